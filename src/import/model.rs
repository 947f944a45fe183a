use std::fmt::Display;

use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use crate::broker::sniff::SNIFF_SAMPLE_LEN;
use crate::broker::BrokerId;

/// Version tags let a consumer tell which implementation produced a result
/// when diagnosing regressions between the registry and its fallback twins.
pub const REGISTRY_PARSER_VERSION: &str = "registry/1.2";
pub const FALLBACK_PARSER_VERSION: &str = "direct/1.2";
pub const NO_PARSER_VERSION: &str = "none";

/// The only failure that propagates out of a parse. Everything else is
/// recovered row-by-row and reported through `ParseResult::warnings`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FatalInputError {
    /// Content is missing a header plus at least one data row.
    TooFewLines(usize),
    /// The header line could not be split into columns.
    UnsplittableHeader,
}

impl Display for FatalInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FatalInputError::TooFewLines(n) => write!(
                f,
                "Content has {n} non-empty line(s); \
                 need a header row plus at least one data row"
            ),
            FatalInputError::UnsplittableHeader => {
                write!(f, "Header row could not be split into columns")
            }
        }
    }
}

impl std::error::Error for FatalInputError {}

/// A file as handed over by the surrounding upload flow. Immutable; the
/// engine only ever reads from it.
#[derive(Clone, Debug)]
pub struct RawInput {
    pub name: String,
    pub media_type: String,
    pub size: usize,
    content: String,
}

impl RawInput {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: String,
    ) -> RawInput {
        RawInput {
            name: name.into(),
            media_type: media_type.into(),
            size: content.len(),
            content,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Prefix handed to the sniffer. Truncated on a char boundary.
    pub fn sniff_sample(&self) -> &str {
        let mut end = SNIFF_SAMPLE_LEN.min(self.content.len());
        while !self.content.is_char_boundary(end) {
            end -= 1;
        }
        &self.content[..end]
    }
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum TradeAction {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "BUY",
            TradeAction::Sell => "SELL",
        }
    }
}

impl Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The canonical trade record all parsers converge to. A value of this type
/// that reaches a caller has passed the central validator: qty and price
/// strictly positive, fees non-negative, non-empty uppercased ticker,
/// well-formed currency code.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct NormalizedTrade {
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub ticker: String,
    #[serde(rename = "type")]
    pub action: TradeAction,
    #[serde(with = "rust_decimal::serde::float")]
    pub qty: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub fees: Decimal,
    pub source: BrokerId,
    #[serde(rename = "rawHash", skip_serializing_if = "Option::is_none")]
    pub raw_hash: Option<String>,
}

#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
pub struct ParseMeta {
    #[serde(rename = "rowCount")]
    pub row_count: usize,
    #[serde(rename = "invalidCount")]
    pub invalid_count: usize,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
    #[serde(rename = "parserVersion")]
    pub parser_version: &'static str,
}

/// The outcome of one parse attempt. Created fresh per invocation and
/// returned by value; never shared or merged across calls.
#[derive(Serialize, Clone, Debug)]
pub struct ParseResult {
    pub broker: BrokerId,
    pub trades: Vec<NormalizedTrade>,
    pub warnings: Vec<String>,
    pub meta: ParseMeta,
}

impl ParseResult {
    /// The empty result surfaced when no parser (registry or fallback) is
    /// available for the resolved broker id.
    pub fn unavailable(broker: BrokerId) -> ParseResult {
        ParseResult {
            broker,
            trades: Vec::new(),
            warnings: vec![format!(
                "No parser registered for '{broker}' format"
            )],
            meta: ParseMeta {
                row_count: 0,
                invalid_count: 0,
                duration_ms: 0,
                parser_version: NO_PARSER_VERSION,
            },
        }
    }
}
