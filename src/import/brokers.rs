// One module per supported source. Each declares its read-only profile
// (column aliases, date convention, default currency) and hands the shared
// row engine a configured parser.

pub mod binance;
pub mod coinbase;
pub mod degiro;
pub mod etoro;
pub mod freetrade;
pub mod generic;
pub mod ibkr;
pub mod kraken;
pub mod revolut;
pub mod trading212;
pub mod webull;
