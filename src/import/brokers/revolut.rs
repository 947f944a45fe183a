use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Revolut,
    display_name: "Revolut",
    date_convention: DateConvention::Iso,
    default_currency: "GBP",
    aliases: FieldAliases {
        date: &["date", "completed date"],
        ticker: &["ticker", "stock", "symbol"],
        instrument: &[],
        action: &["type", "action"],
        quantity: &["quantity"],
        price: &["price per share", "price"],
        total: &["total amount", "total"],
        currency: &["currency"],
        fee: &["commission", "fee"],
    },
};

pub fn parser() -> TableParser {
    TableParser {
        profile: &PROFILE,
        quirks: RowQuirks {
            // "BUY - MARKET" / "SELL - LIMIT" style action cells.
            strip_action_suffix: true,
            ..RowQuirks::default()
        },
    }
}
