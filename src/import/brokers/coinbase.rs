use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Coinbase,
    display_name: "Coinbase",
    date_convention: DateConvention::Iso,
    default_currency: "USD",
    aliases: FieldAliases {
        date: &["timestamp", "timestamp (utc)", "time"],
        ticker: &["asset"],
        instrument: &["notes"],
        action: &["transaction type"],
        quantity: &["quantity transacted", "crypto amount"],
        price: &[
            "usd spot price at transaction",
            "spot price at transaction",
            "spot price",
        ],
        total: &["total (inclusive of fees)", "subtotal"],
        currency: &["spot price currency", "currency"],
        fee: &["fees", "usd fees"],
    },
};

pub fn parser() -> TableParser {
    TableParser { profile: &PROFILE, quirks: RowQuirks::default() }
}
