use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Binance,
    display_name: "Binance",
    date_convention: DateConvention::Iso,
    default_currency: "USD",
    aliases: FieldAliases {
        date: &["date", "date(utc)", "time"],
        ticker: &["market", "pair"],
        instrument: &[],
        action: &["type", "side"],
        quantity: &["amount", "executed"],
        price: &["price"],
        total: &["total"],
        currency: &[],
        fee: &["fee"],
    },
};

pub fn parser() -> TableParser {
    TableParser {
        profile: &PROFILE,
        quirks: RowQuirks {
            // No currency column; a 3-letter quote leg of the market pair
            // (BTC/EUR) is the currency, USDT-style quotes fall back to USD.
            pair_quote_currency: true,
            ..RowQuirks::default()
        },
    }
}
