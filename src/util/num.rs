use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;

use crate::util::basic::SError;

// These were deprecated as methods on Decimal, so re-implement them.
pub fn is_positive(d: &Decimal) -> bool {
    d.is_sign_positive() && !d.is_zero()
}

pub fn is_negative(d: &Decimal) -> bool {
    d.is_sign_negative() && !d.is_zero()
}

lazy_static! {
    // "USD 111.97" style prefixes
    static ref CURRENCY_PREFIX_RE: Regex = Regex::new(r"^[A-Za-z]{3}\s+").unwrap();
    // "180.25X1" style lot-multiplier suffixes
    static ref MULTIPLIER_SUFFIX_RE: Regex = Regex::new(r"[xX]\d+$").unwrap();
}

/// Parses a numeric cell the way brokers actually write them: optional
/// quoting, currency codes or symbols, thousands separators, decimal commas,
/// and lot-multiplier suffixes.
///
/// Comma handling: when both separators appear, whichever occurs first is the
/// thousands separator. A lone comma is read as a decimal comma; repeated
/// commas are thousands separators.
pub fn parse_amount(raw: &str) -> Result<Decimal, SError> {
    let s = raw.trim().trim_matches('"').trim_matches('\'').trim();
    if s.is_empty() {
        return Err("Empty numeric value".to_string());
    }

    let s = CURRENCY_PREFIX_RE.replace(s, "");
    let s = MULTIPLIER_SUFFIX_RE.replace(&s, "");
    let s: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ' ' | '\u{a0}'))
        .collect();

    let has_comma = s.contains(',');
    let has_dot = s.contains('.');
    let cleaned = if has_comma && has_dot {
        if s.find(',') < s.find('.') {
            s.replace(',', "")
        } else {
            s.replace('.', "").replace(',', ".")
        }
    } else if has_comma {
        if s.matches(',').count() > 1 {
            s.replace(',', "")
        } else {
            s.replace(',', ".")
        }
    } else {
        s
    };

    Decimal::from_str(&cleaned)
        .map_err(|e| format!("Invalid number \"{}\": {e}", raw.trim()))
}
