use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Freetrade,
    display_name: "Freetrade",
    date_convention: DateConvention::Iso,
    default_currency: "GBP",
    aliases: FieldAliases {
        date: &["date", "time"],
        ticker: &["stock", "symbol"],
        instrument: &["security", "title"],
        action: &["action", "type"],
        quantity: &["quantity"],
        price: &["price", "price (native)"],
        total: &["total (gbp)", "total"],
        currency: &["currency (native)", "currency"],
        fee: &["fee (gbp)", "fee"],
    },
};

pub fn parser() -> TableParser {
    TableParser { profile: &PROFILE, quirks: RowQuirks::default() }
}
