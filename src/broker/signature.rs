use crate::broker::BrokerId;

/// One detection override: all `requires` header names must be present and
/// no `forbids` name may be, for the rule to claim the file.
///
/// Names are compared against lowercased, trimmed header cells.
pub struct SignatureRule {
    pub broker: BrokerId,
    pub requires: &'static [&'static str],
    pub forbids: &'static [&'static str],
}

impl SignatureRule {
    pub fn matches(&self, headers: &[String]) -> bool {
        let has = |name: &str| headers.iter().any(|h| h.as_str() == name);
        self.requires.iter().all(|r| has(r))
            && !self.forbids.iter().any(|f| has(f))
    }
}

/// Ordered override table. Evaluated top to bottom; the first full match
/// wins, so declared order IS the tie-break between overlapping signatures.
/// More specific signatures sit above weaker ones: e.g. the Revolut rule
/// (ticker + price per share + type) must precede DEGIRO's product/action
/// rule, and pair-based crypto layouts precede the stock layouts they would
/// otherwise shadow. Reorder only with sample files in hand.
pub const OVERRIDE_RULES: &[SignatureRule] = &[
    SignatureRule {
        broker: BrokerId::Etoro,
        requires: &["units", "open rate"],
        forbids: &[],
    },
    SignatureRule {
        broker: BrokerId::Coinbase,
        requires: &["transaction type", "quantity transacted"],
        forbids: &[],
    },
    SignatureRule {
        broker: BrokerId::Ibkr,
        requires: &["t.price", "proceeds"],
        forbids: &[],
    },
    SignatureRule {
        broker: BrokerId::Trading212,
        requires: &["no. of shares", "price / share"],
        forbids: &[],
    },
    SignatureRule {
        broker: BrokerId::Revolut,
        requires: &["ticker", "price per share", "type"],
        forbids: &[],
    },
    SignatureRule {
        broker: BrokerId::Kraken,
        requires: &["pair", "vol", "cost"],
        forbids: &[],
    },
    SignatureRule {
        broker: BrokerId::Binance,
        requires: &["market", "amount", "price"],
        forbids: &["pair"],
    },
    SignatureRule {
        broker: BrokerId::Freetrade,
        requires: &["stock", "quantity", "price"],
        forbids: &["product"],
    },
    SignatureRule {
        broker: BrokerId::Webull,
        requires: &["symbol", "side", "amount"],
        forbids: &[],
    },
    SignatureRule {
        broker: BrokerId::Degiro,
        requires: &["product", "action"],
        forbids: &["ticker"],
    },
];

#[cfg(test)]
mod tests {
    use super::{SignatureRule, OVERRIDE_RULES};
    use crate::broker::BrokerId;

    fn headers(hs: &[&str]) -> Vec<String> {
        hs.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn test_rule_matching() {
        let rule = SignatureRule {
            broker: BrokerId::Degiro,
            requires: &["product", "action"],
            forbids: &["ticker"],
        };
        assert!(rule.matches(&headers(&["date", "product", "action"])));
        assert!(!rule.matches(&headers(&["date", "product"])));
        assert!(!rule.matches(&headers(&["product", "action", "ticker"])));
    }

    #[test]
    fn test_revolut_precedes_degiro() {
        let revolut_pos = OVERRIDE_RULES
            .iter()
            .position(|r| r.broker == BrokerId::Revolut)
            .unwrap();
        let degiro_pos = OVERRIDE_RULES
            .iter()
            .position(|r| r.broker == BrokerId::Degiro)
            .unwrap();
        assert!(revolut_pos < degiro_pos);
    }

    #[test]
    fn test_at_most_one_rule_per_broker() {
        let mut seen = std::collections::HashSet::new();
        for rule in OVERRIDE_RULES {
            assert!(seen.insert(rule.broker), "duplicate rule for {}", rule.broker);
            assert!(!rule.requires.is_empty());
        }
    }
}
