use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Etoro,
    display_name: "eToro",
    date_convention: DateConvention::DayMonthYearSlash,
    default_currency: "USD",
    aliases: FieldAliases {
        date: &["open date", "date", "time"],
        ticker: &["ticker"],
        instrument: &["instrument", "details"],
        action: &["type", "action"],
        quantity: &["units"],
        price: &["open rate", "openrate", "rate"],
        total: &["amount"],
        currency: &["currency"],
        fee: &["fees", "commission"],
    },
};

pub fn parser() -> TableParser {
    TableParser { profile: &PROFILE, quirks: RowQuirks::default() }
}
