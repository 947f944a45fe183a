use tracing::{debug, warn};

use crate::broker::BrokerId;
use crate::import::model::{FatalInputError, ParseResult};
use crate::import::registry::ParserRegistry;
use crate::import::table::ensure_parseable;
use crate::import::tickers::TickerTable;

/// Brokers carrying a redundant embedded parser. The duplication is a
/// deliberate resilience tradeoff against a partially-initialized registry;
/// `tests/fallback_contract_test.rs` pins the twins to their registry
/// counterparts.
const EMBEDDED_FALLBACK_BROKERS: &[BrokerId] =
    &[BrokerId::Revolut, BrokerId::Degiro];

// DEGIRO's name-to-ticker resolution can fail systematically (a localized
// export full of unmapped product names). Few trades drowning in warnings
// is that signature.
const LOW_CONFIDENCE_MAX_TRADES: usize = 3;
const LOW_CONFIDENCE_MIN_WARNINGS: usize = 5;

fn has_embedded_fallback(id: BrokerId) -> bool {
    EMBEDDED_FALLBACK_BROKERS.contains(&id)
}

fn low_confidence(r: &ParseResult) -> bool {
    r.trades.len() <= LOW_CONFIDENCE_MAX_TRADES
        && r.warnings.len() >= LOW_CONFIDENCE_MIN_WARNINGS
        && r.warnings.len() >= 3 * r.trades.len().max(1)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EscalationState {
    NotAttempted,
    PrimaryAttempted,
    Resolved,
    PrimaryFailed,
    LowConfidence,
    FallbackAttempted,
}

/// Wraps registry dispatch with the bounded retry policy: at most one
/// fallback attempt, and the result with non-trivial output wins. Created
/// fresh per parse; `state()` exposes where the last parse ended up.
pub struct EscalationController<'r> {
    registry: &'r ParserRegistry,
    state: EscalationState,
}

impl<'r> EscalationController<'r> {
    pub fn new(registry: &'r ParserRegistry) -> EscalationController<'r> {
        EscalationController { registry, state: EscalationState::NotAttempted }
    }

    pub fn state(&self) -> EscalationState {
        self.state
    }

    pub fn parse(
        &mut self,
        id: BrokerId,
        content: &str,
        tickers: &TickerTable,
    ) -> Result<ParseResult, FatalInputError> {
        self.state = EscalationState::NotAttempted;
        // The fatal-input contract holds even when no parser will run.
        ensure_parseable(content)?;

        let primary = match self.registry.parse(id, content, tickers) {
            Some(res) => {
                self.state = EscalationState::PrimaryAttempted;
                Some(res?)
            }
            None => {
                self.state = EscalationState::PrimaryFailed;
                warn!(broker = %id, "no parser registered");
                None
            }
        };

        let escalate = match &primary {
            None => has_embedded_fallback(id),
            Some(r) => {
                if has_embedded_fallback(id)
                    && (r.trades.is_empty()
                        || (id == BrokerId::Degiro && low_confidence(r)))
                {
                    self.state = EscalationState::LowConfidence;
                    true
                } else {
                    false
                }
            }
        };

        if escalate {
            if let Some(fb_res) = direct::parse(id, content, tickers) {
                self.state = EscalationState::FallbackAttempted;
                debug!(broker = %id, "running embedded fallback parser");
                match fb_res {
                    Ok(fb) => {
                        let chosen = choose(primary, fb);
                        self.state = EscalationState::Resolved;
                        return Ok(chosen);
                    }
                    Err(e) => {
                        // Keep the primary result; the fallback gets no
                        // second attempt.
                        warn!(broker = %id, "embedded fallback failed: {e}");
                    }
                }
            }
        }

        self.state = EscalationState::Resolved;
        match primary {
            Some(r) => Ok(r),
            None => Ok(ParseResult::unavailable(id)),
        }
    }
}

/// Never discards a primary result in favor of a weaker fallback one: the
/// fallback must produce strictly more trades to replace it.
fn choose(primary: Option<ParseResult>, fallback: ParseResult) -> ParseResult {
    match primary {
        None => fallback,
        Some(p) => {
            if fallback.trades.len() > p.trades.len() {
                fallback
            } else {
                p
            }
        }
    }
}

pub fn parse_with_escalation(
    registry: &ParserRegistry,
    id: BrokerId,
    content: &str,
    tickers: &TickerTable,
) -> Result<ParseResult, FatalInputError> {
    EscalationController::new(registry).parse(id, content, tickers)
}

/// The embedded twins. Each duplicates its registry counterpart's mapping
/// by hand (sharing only the leaf utilities), so a broken or missing
/// registry entry cannot take the broker down with it. Public so the
/// contract tests can pin the equivalence.
pub mod direct {
    use std::time::Instant;

    use rust_decimal::Decimal;

    use crate::broker::BrokerId;
    use crate::import::engine::{
        classify_action, is_skip_category, resolve_instrument, resolve_symbol,
    };
    use crate::import::model::{
        FatalInputError, NormalizedTrade, ParseMeta, ParseResult,
        FALLBACK_PARSER_VERSION,
    };
    use crate::import::normalize::normalize;
    use crate::import::table::Table;
    use crate::import::tickers::TickerTable;
    use crate::util::basic::SError;
    use crate::util::date::{parse_datetime, DateConvention};
    use crate::util::fingerprint::row_fingerprint;
    use crate::util::num::parse_amount;

    pub fn parse(
        id: BrokerId,
        content: &str,
        tickers: &TickerTable,
    ) -> Option<Result<ParseResult, FatalInputError>> {
        match id {
            BrokerId::Revolut => Some(revolut(content, tickers)),
            BrokerId::Degiro => Some(degiro(content, tickers)),
            _ => None,
        }
    }

    fn finish(
        broker: BrokerId,
        table: &Table,
        candidates: Vec<NormalizedTrade>,
        mut warnings: Vec<String>,
        started: Instant,
    ) -> ParseResult {
        let record_warnings: Vec<String> = table
            .record_errors()
            .iter()
            .map(|(n, e)| format!("row {n}: {e}"))
            .collect();
        warnings.splice(0..0, record_warnings);
        let (trades, dropped) = normalize(candidates);
        let invalid_count = warnings.len() + dropped;
        ParseResult {
            broker,
            trades,
            warnings,
            meta: ParseMeta {
                row_count: table.data_row_count(),
                invalid_count,
                duration_ms: started.elapsed().as_millis() as u64,
                parser_version: FALLBACK_PARSER_VERSION,
            },
        }
    }

    fn revolut(
        content: &str,
        _tickers: &TickerTable,
    ) -> Result<ParseResult, FatalInputError> {
        let started = Instant::now();
        let table = Table::parse(content)?;

        let date_col = table.col(&["date", "completed date"]);
        let ticker_col = table.col(&["ticker", "stock", "symbol"]);
        let action_col = table.col(&["type", "action"]);
        let qty_col = table.col(&["quantity"]);
        let price_col = table.col(&["price per share", "price"]);
        let total_col = table.col(&["total amount", "total"]);
        let currency_col = table.col(&["currency"]);
        let fee_col = table.col(&["commission", "fee"]);

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();

        for row in table.rows() {
            let row_res = (|| -> Result<Option<NormalizedTrade>, SError> {
                let mut action = row.get(action_col).to_string();
                if let Some((head, _)) = action.split_once(" - ") {
                    action = head.trim().to_string();
                }
                if action.is_empty() || is_skip_category(&action) {
                    return Ok(None);
                }

                let qty = parse_amount(row.get(qty_col))
                    .map_err(|e| format!("Bad quantity: {e}"))?;
                let total = match total_col {
                    Some(i) => parse_amount(row.get(Some(i))).ok(),
                    None => None,
                };

                let date = parse_datetime(row.get(date_col), DateConvention::Iso)
                    .map_err(|e| format!("Bad date: {e}"))?;

                let price = match parse_amount(row.get(price_col)) {
                    Ok(p) => p.abs(),
                    Err(price_err) => match (&total, qty.is_zero()) {
                        (Some(t), false) => (*t / qty).abs(),
                        _ => return Err(format!("Bad price: {price_err}")),
                    },
                };

                let symbol = row.get(ticker_col);
                if symbol.is_empty() {
                    return Err("Missing ticker".to_string());
                }
                let (ticker, _) = resolve_symbol(symbol);

                let currency_raw = row.get(currency_col).to_uppercase();
                let currency = if currency_raw.len() == 3
                    && currency_raw.chars().all(|c| c.is_ascii_alphabetic())
                {
                    currency_raw
                } else {
                    "GBP".to_string()
                };

                let fees = match fee_col {
                    Some(i) => parse_amount(row.get(Some(i)))
                        .map(|f| f.abs())
                        .unwrap_or(Decimal::ZERO),
                    None => Decimal::ZERO,
                };

                Ok(Some(NormalizedTrade {
                    date,
                    ticker,
                    action: classify_action(&action),
                    qty: qty.abs(),
                    price,
                    currency,
                    fees,
                    source: BrokerId::Revolut,
                    raw_hash: Some(row_fingerprint(row.pairs())),
                }))
            })();

            match row_res {
                Ok(Some(t)) => candidates.push(t),
                Ok(None) => (),
                Err(e) => warnings.push(format!("row {}: {e}", row.row_num())),
            }
        }

        Ok(finish(BrokerId::Revolut, &table, candidates, warnings, started))
    }

    fn degiro(
        content: &str,
        tickers: &TickerTable,
    ) -> Result<ParseResult, FatalInputError> {
        let started = Instant::now();
        let table = Table::parse(content)?;

        let date_col = table.col(&["date", "datum"]);
        let product_col = table.col(&["product"]);
        let action_col = table.col(&["action", "buy/sell"]);
        let qty_col = table.col(&["quantity", "number"]);
        let price_col = table.col(&["price"]);
        let total_col = table.col(&["total", "value"]);
        let currency_col = table.col(&["currency"]);
        let fee_col = table.col(&["transaction costs", "fee"]);

        let mut candidates = Vec::new();
        let mut warnings = Vec::new();

        for row in table.rows() {
            let row_res = (|| -> Result<Option<NormalizedTrade>, SError> {
                let action = row.get(action_col);
                if action.is_empty() || is_skip_category(action) {
                    return Ok(None);
                }

                let qty = parse_amount(row.get(qty_col))
                    .map_err(|e| format!("Bad quantity: {e}"))?;
                let total = match total_col {
                    Some(i) => parse_amount(row.get(Some(i))).ok(),
                    None => None,
                };

                let date = parse_datetime(
                    row.get(date_col),
                    DateConvention::DayMonthYearDash,
                )
                .map_err(|e| format!("Bad date: {e}"))?;

                let price = match parse_amount(row.get(price_col)) {
                    Ok(p) => p.abs(),
                    Err(price_err) => match (&total, qty.is_zero()) {
                        (Some(t), false) => (*t / qty).abs(),
                        _ => return Err(format!("Bad price: {price_err}")),
                    },
                };

                let product = row.get(product_col);
                if product.is_empty() {
                    return Err("Missing ticker".to_string());
                }
                let ticker = resolve_instrument(product, tickers);

                let currency_raw = row.get(currency_col).to_uppercase();
                let currency = if currency_raw.len() == 3
                    && currency_raw.chars().all(|c| c.is_ascii_alphabetic())
                {
                    currency_raw
                } else {
                    "EUR".to_string()
                };

                let fees = match fee_col {
                    Some(i) => parse_amount(row.get(Some(i)))
                        .map(|f| f.abs())
                        .unwrap_or(Decimal::ZERO),
                    None => Decimal::ZERO,
                };

                Ok(Some(NormalizedTrade {
                    date,
                    ticker,
                    action: classify_action(action),
                    qty: qty.abs(),
                    price,
                    currency,
                    fees,
                    source: BrokerId::Degiro,
                    raw_hash: Some(row_fingerprint(row.pairs())),
                }))
            })();

            match row_res {
                Ok(Some(t)) => candidates.push(t),
                Ok(None) => (),
                Err(e) => warnings.push(format!("row {}: {e}", row.row_num())),
            }
        }

        Ok(finish(BrokerId::Degiro, &table, candidates, warnings, started))
    }
}
