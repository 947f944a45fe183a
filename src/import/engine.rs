use std::time::Instant;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::debug;

use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::model::{
    FatalInputError, NormalizedTrade, ParseMeta, ParseResult, TradeAction,
    REGISTRY_PARSER_VERSION,
};
use crate::import::normalize::normalize;
use crate::import::table::{Row, Table};
use crate::import::tickers::TickerTable;
use crate::util::basic::SError;
use crate::util::date::parse_datetime;
use crate::util::fingerprint::row_fingerprint;
use crate::util::num::{is_negative, is_positive, parse_amount};

lazy_static! {
    // Non-trade activity categories. Rows matching these are skipped
    // silently; they are expected content, not errors.
    static ref SKIP_CATEGORY_RE: Regex = Regex::new(concat!(
        r"(?i)dividend|interest|transfer|deposit|withdraw|top[ \-]?up|\bsplit\b",
        r"|\bfee\b|commission|staking|reward|promo|airdrop|receive|send|gift",
        r"|\bconvert\b|cash (in|out)"
    ))
    .unwrap();
    static ref SELL_RE: Regex =
        Regex::new(r"(?i)\b(sell|sale|sold|close|short|reduce)\b").unwrap();
    // "BTC/USDT", "BTC-USDT"
    static ref PAIR_RE: Regex =
        Regex::new(r"^([A-Za-z0-9]{2,10})[/\-]([A-Za-z0-9]{2,10})$").unwrap();
    // "AAPL:US"
    static ref COLON_SUFFIX_RE: Regex =
        Regex::new(r"^([A-Za-z0-9.\-]+):[A-Za-z]{1,4}$").unwrap();
    // "VUSA.L", "SAP.DE"
    static ref EXCHANGE_DOT_RE: Regex =
        Regex::new(r"(?i)\.(US|L|DE|MI|AS|PA|SW|TO|HK|JP)$").unwrap();
}

pub fn is_skip_category(action: &str) -> bool {
    SKIP_CATEGORY_RE.is_match(action)
}

/// Sell when the action text says so; everything left over is a buy.
pub fn classify_action(action: &str) -> TradeAction {
    if SELL_RE.is_match(action) {
        TradeAction::Sell
    } else {
        TradeAction::Buy
    }
}

/// Cleans an explicit symbol cell: pair tickers keep their base leg,
/// exchange qualifiers are stripped. Returns the symbol and, for pairs,
/// the quote leg.
pub fn resolve_symbol(raw: &str) -> (String, Option<String>) {
    let s = raw.trim();
    if let Some(caps) = PAIR_RE.captures(s) {
        return (
            caps[1].to_uppercase(),
            Some(caps[2].to_uppercase()),
        );
    }
    if let Some(caps) = COLON_SUFFIX_RE.captures(s) {
        return (caps[1].to_uppercase(), None);
    }
    let s = EXCHANGE_DOT_RE.replace(s, "");
    (s.to_uppercase(), None)
}

/// Derives a ticker from a free-text instrument name: the curated table
/// first, then a trailing ticker-looking token ("Apple Inc. AAPL"), then
/// the uppercased name itself.
pub fn resolve_instrument(name: &str, tickers: &TickerTable) -> String {
    if let Some(t) = tickers.lookup(name) {
        return t.to_string();
    }
    if name.contains(' ') {
        if let Some(last) = name.split_whitespace().last() {
            let token = last.trim_matches(|c| c == '(' || c == ')');
            if token.len() >= 2
                && token.len() <= 6
                && token
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
            {
                return token.to_string();
            }
        }
    }
    name.to_uppercase()
}

fn well_formed_currency(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

/// Per-broker behaviors layered over the shared row engine.
#[derive(Clone, Copy, Default)]
pub struct RowQuirks {
    /// Cut "BUY - MARKET" style action text at the dash.
    pub strip_action_suffix: bool,
    /// No action column in the export; infer buy/sell from quantity and
    /// proceeds signs (Flex statements).
    pub infer_action_from_signs: bool,
    /// With no currency column, take a 3-letter quote leg of a pair ticker
    /// as the currency.
    pub pair_quote_currency: bool,
}

struct Cols {
    date: Option<usize>,
    ticker: Option<usize>,
    instrument: Option<usize>,
    action: Option<usize>,
    quantity: Option<usize>,
    price: Option<usize>,
    total: Option<usize>,
    currency: Option<usize>,
    fee: Option<usize>,
}

impl Cols {
    fn resolve(table: &Table, aliases: &FieldAliases) -> Cols {
        Cols {
            date: table.col(aliases.date),
            ticker: table.col(aliases.ticker),
            instrument: table.col(aliases.instrument),
            action: table.col(aliases.action),
            quantity: table.col(aliases.quantity),
            price: table.col(aliases.price),
            total: table.col(aliases.total),
            currency: table.col(aliases.currency),
            fee: table.col(aliases.fee),
        }
    }
}

/// One registry parser: the shared engine specialized by a broker profile
/// and its quirks. All per-broker modules produce one of these.
pub struct TableParser {
    pub profile: &'static BrokerProfile,
    pub quirks: RowQuirks,
}

impl TableParser {
    pub fn id(&self) -> BrokerId {
        self.profile.id
    }

    pub fn parse(
        &self,
        content: &str,
        tickers: &TickerTable,
    ) -> Result<ParseResult, FatalInputError> {
        let started = Instant::now();
        let table = Table::parse(content)?;
        let cols = Cols::resolve(&table, &self.profile.aliases);

        let mut warnings: Vec<String> = table
            .record_errors()
            .iter()
            .map(|(n, e)| format!("row {n}: {e}"))
            .collect();
        let mut candidates = Vec::new();

        for row in table.rows() {
            match self.parse_row(&row, &cols, tickers) {
                Ok(Some(t)) => candidates.push(t),
                Ok(None) => (),
                Err(e) => warnings.push(format!("row {}: {e}", row.row_num())),
            }
        }

        let (trades, dropped) = normalize(candidates);
        let invalid_count = warnings.len() + dropped;
        debug!(
            broker = %self.profile.id,
            rows = table.data_row_count(),
            trades = trades.len(),
            invalid = invalid_count,
            "parsed table"
        );
        Ok(ParseResult {
            broker: self.profile.id,
            trades,
            warnings,
            meta: ParseMeta {
                row_count: table.data_row_count(),
                invalid_count,
                duration_ms: started.elapsed().as_millis() as u64,
                parser_version: REGISTRY_PARSER_VERSION,
            },
        })
    }

    fn parse_row(
        &self,
        row: &Row,
        cols: &Cols,
        tickers: &TickerTable,
    ) -> Result<Option<NormalizedTrade>, SError> {
        let mut action_raw = row.get(cols.action).to_string();
        if self.quirks.strip_action_suffix {
            if let Some((head, _)) = action_raw.split_once(" - ") {
                action_raw = head.trim().to_string();
            }
        }

        if action_raw.is_empty() && !self.quirks.infer_action_from_signs {
            // Blank action rows are padding (balances, summaries), not trades.
            return Ok(None);
        }
        if is_skip_category(&action_raw) {
            return Ok(None);
        }

        let qty = parse_amount(row.get(cols.quantity))
            .map_err(|e| format!("Bad quantity: {e}"))?;
        let total = match cols.total {
            Some(i) => parse_amount(row.get(Some(i))).ok(),
            None => None,
        };

        let action = if action_raw.is_empty() {
            infer_action_from_signs(&qty, total.as_ref())
        } else {
            classify_action(&action_raw)
        };

        let date_raw = row.get(cols.date);
        let date = parse_datetime(date_raw, self.profile.date_convention)
            .map_err(|e| format!("Bad date: {e}"))?;

        let price = match parse_amount(row.get(cols.price)) {
            Ok(p) => p.abs(),
            Err(price_err) => match (&total, qty.is_zero()) {
                (Some(t), false) => (*t / qty).abs(),
                _ => return Err(format!("Bad price: {price_err}")),
            },
        };

        let (ticker, pair_quote) = self.resolve_ticker(row, cols, tickers)?;

        let currency_raw = row.get(cols.currency).to_uppercase();
        let currency = if well_formed_currency(&currency_raw) {
            currency_raw
        } else if self.quirks.pair_quote_currency {
            match pair_quote {
                Some(q) if well_formed_currency(&q) => q,
                _ => self.profile.default_currency.to_string(),
            }
        } else {
            self.profile.default_currency.to_string()
        };

        let fees = match cols.fee {
            Some(i) => parse_amount(row.get(Some(i)))
                .map(|f| f.abs())
                .unwrap_or(Decimal::ZERO),
            None => Decimal::ZERO,
        };

        Ok(Some(NormalizedTrade {
            date,
            ticker,
            action,
            qty: qty.abs(),
            price,
            currency,
            fees,
            source: self.profile.id,
            raw_hash: Some(row_fingerprint(row.pairs())),
        }))
    }

    fn resolve_ticker(
        &self,
        row: &Row,
        cols: &Cols,
        tickers: &TickerTable,
    ) -> Result<(String, Option<String>), SError> {
        let explicit = row.get(cols.ticker);
        if !explicit.is_empty() {
            return Ok(resolve_symbol(explicit));
        }
        let name = row.get(cols.instrument);
        if !name.is_empty() {
            return Ok((resolve_instrument(name, tickers), None));
        }
        Err("Missing ticker".to_string())
    }
}

fn infer_action_from_signs(qty: &Decimal, total: Option<&Decimal>) -> TradeAction {
    if is_negative(qty) {
        return TradeAction::Sell;
    }
    match total {
        Some(t) if is_negative(t) => TradeAction::Buy,
        Some(t) if is_positive(t) && is_positive(qty) => TradeAction::Sell,
        _ => TradeAction::Buy,
    }
}
