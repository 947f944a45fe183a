use crate::broker::BrokerId;
use crate::util::date::DateConvention;

/// Accepted column names per logical field, in preference order.
/// Matched case-insensitively against trimmed header cells.
pub struct FieldAliases {
    pub date: &'static [&'static str],
    /// Columns holding an explicit ticker/symbol.
    pub ticker: &'static [&'static str],
    /// Columns holding a free-text instrument or product name, used when no
    /// ticker column is present.
    pub instrument: &'static [&'static str],
    pub action: &'static [&'static str],
    pub quantity: &'static [&'static str],
    pub price: &'static [&'static str],
    /// Gross/total value columns; used to derive price when the price cell
    /// is absent.
    pub total: &'static [&'static str],
    pub currency: &'static [&'static str],
    pub fee: &'static [&'static str],
}

/// Read-only descriptor for one supported source. Profiles are declared
/// once as statics and shared across all parses.
pub struct BrokerProfile {
    pub id: BrokerId,
    pub display_name: &'static str,
    pub date_convention: DateConvention,
    pub default_currency: &'static str,
    pub aliases: FieldAliases,
}
