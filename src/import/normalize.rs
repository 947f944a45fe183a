use crate::import::model::NormalizedTrade;
use crate::util::num::{is_negative, is_positive};

/// The single enforcement point for the canonical trade invariants.
/// Parsers are numerous and individually fallible; whatever they emit goes
/// through here, and anything violating the invariants is dropped and
/// counted. Idempotent: already-canonical trades pass through unchanged.
pub fn normalize(
    candidates: Vec<NormalizedTrade>,
) -> (Vec<NormalizedTrade>, usize) {
    let mut trades = Vec::with_capacity(candidates.len());
    let mut dropped = 0usize;
    for mut t in candidates {
        t.ticker = t.ticker.trim().to_string();
        t.ticker.make_ascii_uppercase();
        t.currency = t.currency.trim().to_string();
        t.currency.make_ascii_uppercase();
        if is_canonical(&t) {
            trades.push(t);
        } else {
            dropped += 1;
        }
    }
    (trades, dropped)
}

fn is_canonical(t: &NormalizedTrade) -> bool {
    is_positive(&t.qty)
        && is_positive(&t.price)
        && !is_negative(&t.fees)
        && !t.ticker.is_empty()
        && t.currency.len() == 3
        && t.currency.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use super::normalize;
    use crate::broker::BrokerId;
    use crate::import::model::{NormalizedTrade, TradeAction};
    use crate::testlib::assert_vecr_eq;

    fn trade() -> NormalizedTrade {
        NormalizedTrade {
            date: datetime!(2024-01-01 00:00:00 UTC),
            ticker: "AAPL".to_string(),
            action: TradeAction::Buy,
            qty: dec!(10),
            price: dec!(150),
            currency: "USD".to_string(),
            fees: dec!(0),
            source: BrokerId::Generic,
            raw_hash: None,
        }
    }

    #[test]
    fn test_normalize_keeps_canonical_rows() {
        let (trades, dropped) = normalize(vec![trade()]);
        assert_eq!(trades.len(), 1);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn test_normalize_canonicalizes_case() {
        let mut t = trade();
        t.ticker = " aapl ".to_string();
        t.currency = "usd".to_string();
        let (trades, _) = normalize(vec![t]);
        assert_eq!(trades[0].ticker, "AAPL");
        assert_eq!(trades[0].currency, "USD");
    }

    #[test]
    fn test_normalize_drops_invariant_violations() {
        let zero_qty = NormalizedTrade { qty: dec!(0), ..trade() };
        let neg_price = NormalizedTrade { price: dec!(-1), ..trade() };
        let neg_fees = NormalizedTrade { fees: dec!(-0.5), ..trade() };
        let blank_ticker =
            NormalizedTrade { ticker: "   ".to_string(), ..trade() };
        let bad_currency =
            NormalizedTrade { currency: "US".to_string(), ..trade() };

        let (trades, dropped) = normalize(vec![
            zero_qty,
            trade(),
            neg_price,
            neg_fees,
            blank_ticker,
            bad_currency,
        ]);
        assert_eq!(trades.len(), 1);
        assert_eq!(dropped, 5);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut messy = trade();
        messy.ticker = "aapl".to_string();
        let (once, dropped) = normalize(vec![messy, trade()]);
        assert_eq!(dropped, 0);
        let (twice, dropped) = normalize(once.clone());
        assert_eq!(dropped, 0);
        assert_vecr_eq(&once, &twice);
    }
}
