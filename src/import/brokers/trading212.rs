use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Trading212,
    display_name: "Trading 212",
    date_convention: DateConvention::Iso,
    default_currency: "GBP",
    aliases: FieldAliases {
        date: &["time", "date"],
        ticker: &["ticker"],
        instrument: &["name"],
        action: &["action"],
        quantity: &["no. of shares", "quantity"],
        price: &["price / share", "price"],
        total: &["total", "total (gbp)"],
        currency: &["currency (price / share)", "currency"],
        fee: &["charge amount", "fee"],
    },
};

pub fn parser() -> TableParser {
    TableParser { profile: &PROFILE, quirks: RowQuirks::default() }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::import::model::TradeAction;
    use crate::import::tickers::TickerTable;

    #[test]
    fn test_parse_statement() {
        let content = "\
Action,Time,Ticker,Name,No. of shares,Price / share,Currency (Price / share),Total
Market buy,2024-02-05 14:02:10,AAPL,Apple Inc,1.5,182.50,USD,273.75
Market sell,2024-02-06 09:30:00,MSFT,Microsoft,2,410.00,USD,820.00
Dividend (Ordinary),2024-02-07 00:00:00,AAPL,Apple Inc,0.1,0.24,USD,0.02
Deposit,2024-02-08 00:00:00,,,,,,500.00
";
        let res = super::parser()
            .parse(content, &TickerTable::curated())
            .unwrap();
        assert_eq!(res.trades.len(), 2);
        assert!(res.warnings.is_empty());
        assert_eq!(res.meta.row_count, 4);

        let buy = &res.trades[0];
        assert_eq!(buy.ticker, "AAPL");
        assert_eq!(buy.action, TradeAction::Buy);
        assert_eq!(buy.qty, dec!(1.5));
        assert_eq!(buy.price, dec!(182.50));
        assert_eq!(buy.currency, "USD");

        assert_eq!(res.trades[1].action, TradeAction::Sell);
    }
}
