use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Webull,
    display_name: "Webull",
    date_convention: DateConvention::MonthDayYearSlash,
    default_currency: "USD",
    aliases: FieldAliases {
        date: &["date", "filled time"],
        ticker: &["symbol"],
        instrument: &["name"],
        action: &["side"],
        quantity: &["quantity", "filled"],
        price: &["price", "avg price"],
        total: &["amount"],
        currency: &["currency"],
        fee: &["fee", "commission"],
    },
};

pub fn parser() -> TableParser {
    TableParser { profile: &PROFILE, quirks: RowQuirks::default() }
}
