use std::collections::HashMap;

// Corporate suffixes stripped when normalizing an instrument name for
// lookup, so "Apple Inc." and "Apple" resolve identically.
const NAME_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "co", "company", "ltd", "limited", "plc",
    "sa", "nv", "se", "ag", "group", "holdings",
];

// name (normalized form) -> ticker
const CURATED_TICKERS: &[(&str, &str)] = &[
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("tesla", "TSLA"),
    ("tesla motors", "TSLA"),
    ("amazon", "AMZN"),
    ("amazon com", "AMZN"),
    ("alphabet", "GOOGL"),
    ("google", "GOOGL"),
    ("nvidia", "NVDA"),
    ("meta platforms", "META"),
    ("netflix", "NFLX"),
    ("advanced micro devices", "AMD"),
    ("intel", "INTC"),
    ("international business machines", "IBM"),
    ("coca cola", "KO"),
    ("vanguard s&p 500 ucits etf", "VUSA"),
    ("ishares core msci world ucits etf", "IWDA"),
];

fn normalize_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c == '.' || c == ',' { ' ' } else { c })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    while let Some(last) = tokens.last().copied() {
        if tokens.len() > 1 && NAME_SUFFIXES.contains(&last) {
            tokens.pop();
        } else {
            break;
        }
    }
    tokens.join(" ")
}

/// Curated instrument-name to ticker mapping. Injected, immutable
/// configuration: built once by the caller and shared across parses.
pub struct TickerTable {
    names: HashMap<String, String>,
}

impl TickerTable {
    pub fn curated() -> TickerTable {
        TickerTable::from_entries(
            CURATED_TICKERS.iter().map(|(n, t)| (n.to_string(), t.to_string())),
        )
    }

    pub fn empty() -> TickerTable {
        TickerTable { names: HashMap::new() }
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> TickerTable {
        let names = entries
            .into_iter()
            .map(|(n, t)| (normalize_name(&n), t.to_uppercase()))
            .collect();
        TickerTable { names }
    }

    pub fn lookup(&self, instrument_name: &str) -> Option<&str> {
        self.names
            .get(&normalize_name(instrument_name))
            .map(|s| s.as_str())
    }
}
