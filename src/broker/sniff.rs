use tracing::debug;

use crate::broker::signature::OVERRIDE_RULES;
use crate::broker::BrokerId;

/// Bytes of content the sniffer needs; the header line is what matters.
pub const SNIFF_SAMPLE_LEN: usize = 2048;

/// Lowercased, trimmed cells of the sample's header line. Parsed with the
/// csv reader so quoted headers containing commas split correctly.
fn header_fields(sample: &str) -> Vec<String> {
    let first_line = sample.lines().next().unwrap_or("");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(first_line.as_bytes());
    match rdr.records().next() {
        Some(Ok(rec)) => rec.iter().map(|c| c.trim().to_lowercase()).collect(),
        _ => Vec::new(),
    }
}

// Column shapes shared by several brokers. Matching one of these only says
// "some broker-ish table"; the override rules refine or replace the guess.
const COARSE_SHAPES: &[(&[&str], BrokerId)] = &[
    (&["date", "type", "quantity", "price"], BrokerId::Generic),
    (&["date", "action", "quantity", "price"], BrokerId::Generic),
    (&["timestamp", "quantity", "price"], BrokerId::Generic),
];

const QUANTITY_NAMES: &[&str] = &[
    "quantity",
    "qty",
    "shares",
    "units",
    "amount",
    "vol",
    "no. of shares",
    "quantity transacted",
];

/// Weak baseline detector. Frequently wrong on purpose: half the supported
/// brokers share a Date/Type/Quantity/Price vocabulary, so this can do no
/// better than "looks like a trade table".
fn generic_guess(headers: &[String]) -> BrokerId {
    let has = |name: &str| headers.iter().any(|h| h.as_str() == name);
    for (shape, id) in COARSE_SHAPES {
        if shape.iter().all(|c| has(c)) {
            return *id;
        }
    }
    let has_date = headers
        .iter()
        .any(|h| h.contains("date") || h.contains("time"));
    let has_qty = QUANTITY_NAMES.iter().any(|n| has(n));
    let has_price = headers
        .iter()
        .any(|h| h.contains("price") || h.contains("rate"));
    if has_date && has_qty && has_price {
        BrokerId::Generic
    } else {
        BrokerId::Unknown
    }
}

/// Infers the producing broker from a content sample. Never fails: the
/// worst case is `BrokerId::Unknown`, which callers should treat as "ask
/// the user", not as an error.
pub fn sniff(sample: &str) -> BrokerId {
    let headers = header_fields(sample);
    if headers.is_empty() {
        return BrokerId::Unknown;
    }
    let baseline = generic_guess(&headers);
    for rule in OVERRIDE_RULES {
        if rule.matches(&headers) {
            debug!(broker = %rule.broker, baseline = %baseline, "signature override");
            return rule.broker;
        }
    }
    debug!(broker = %baseline, "no signature override matched");
    baseline
}
