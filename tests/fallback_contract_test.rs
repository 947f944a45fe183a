// Contract tests pinning the embedded fallback parsers to their registry
// counterparts, plus escalation policy behavior around them.

use openbroker::broker::{BrokerId, BrokerProfile, FieldAliases};
use openbroker::import::engine::{RowQuirks, TableParser};
use openbroker::import::fallback::{
    direct, parse_with_escalation, EscalationController, EscalationState,
};
use openbroker::import::model::{
    FALLBACK_PARSER_VERSION, REGISTRY_PARSER_VERSION,
};
use openbroker::import::registry::ParserRegistry;
use openbroker::import::tickers::TickerTable;
use openbroker::testlib::assert_vecr_eq;
use openbroker::util::date::DateConvention;

const REVOLUT_CSV: &str = "\
Date,Ticker,Type,Quantity,Price per share,Currency
2024-01-15T10:30:00Z,AAPL,BUY - MARKET,2,USD 185.40,USD
2024-01-16T11:00:00Z,AAPL,SELL - LIMIT,1,USD 190.00,USD
2024-01-17T09:00:00Z,,CASH TOP-UP,,,
2024-01-18T09:00:00Z,MSFT,BUY,not-a-number,410.00,USD
bad-date,MSFT,BUY,1,410.00,USD
";

const DEGIRO_CSV: &str = "\
Date,Product,Action,Quantity,Price,Currency,Transaction costs
01-03-2024,Apple Inc,Buy,10,\"180,25\",USD,\"2,50\"
02-03-2024,Some Obscure Fund,Sell,5,20.00,EUR,
03-03-2024,Apple Inc,Buy,ten,180.25,USD,
04-03-2024,Apple Inc,Dividend,,,USD,
";

fn registry_result(id: BrokerId, content: &str) -> openbroker::import::ParseResult {
    ParserRegistry::with_all_brokers()
        .parse(id, content, &TickerTable::curated())
        .expect("parser must be registered")
        .expect("parse must not be fatal")
}

fn direct_result(id: BrokerId, content: &str) -> openbroker::import::ParseResult {
    direct::parse(id, content, &TickerTable::curated())
        .expect("twin must exist")
        .expect("parse must not be fatal")
}

fn assert_twin_equivalence(id: BrokerId, content: &str) {
    let registry = registry_result(id, content);
    let fallback = direct_result(id, content);

    assert_vecr_eq(&registry.trades, &fallback.trades);
    assert_vecr_eq(&registry.warnings, &fallback.warnings);
    assert_eq!(registry.broker, fallback.broker);
    assert_eq!(registry.meta.row_count, fallback.meta.row_count);
    assert_eq!(registry.meta.invalid_count, fallback.meta.invalid_count);
    // Only the version tag may differ.
    assert_eq!(registry.meta.parser_version, REGISTRY_PARSER_VERSION);
    assert_eq!(fallback.meta.parser_version, FALLBACK_PARSER_VERSION);
}

#[test]
fn test_revolut_twin_equivalence() {
    assert_twin_equivalence(BrokerId::Revolut, REVOLUT_CSV);

    // Sanity: the fixture exercises trades, skips, and warnings.
    let r = registry_result(BrokerId::Revolut, REVOLUT_CSV);
    assert_eq!(r.trades.len(), 2);
    assert_eq!(r.warnings.len(), 2);
}

#[test]
fn test_degiro_twin_equivalence() {
    assert_twin_equivalence(BrokerId::Degiro, DEGIRO_CSV);

    let r = registry_result(BrokerId::Degiro, DEGIRO_CSV);
    assert_eq!(r.trades.len(), 2);
    assert_eq!(r.trades[0].ticker, "AAPL");
    assert_eq!(r.warnings.len(), 1);
}

// A registry entry whose column wiring is wrong for the broker it claims,
// standing in for a stale or partially-initialized registry.
static MISWIRED_REVOLUT: BrokerProfile = BrokerProfile {
    id: BrokerId::Revolut,
    display_name: "Revolut",
    date_convention: DateConvention::Iso,
    default_currency: "GBP",
    aliases: FieldAliases {
        date: &["date"],
        ticker: &["ticker"],
        instrument: &[],
        action: &["type"],
        quantity: &["shares outstanding"],
        price: &["mark price"],
        total: &[],
        currency: &["currency"],
        fee: &[],
    },
};

#[test]
fn test_zero_trade_primary_escalates_to_fallback() {
    let mut registry = ParserRegistry::with_all_brokers();
    registry.register(TableParser {
        profile: &MISWIRED_REVOLUT,
        quirks: RowQuirks::default(),
    });

    let mut ctl = EscalationController::new(&registry);
    let res = ctl
        .parse(BrokerId::Revolut, REVOLUT_CSV, &TickerTable::curated())
        .unwrap();

    // The miswired primary produced zero trades; the embedded twin's
    // result is the one returned.
    assert_eq!(ctl.state(), EscalationState::Resolved);
    assert_eq!(res.meta.parser_version, FALLBACK_PARSER_VERSION);
    assert_eq!(res.trades.len(), 2);
}

#[test]
fn test_incomplete_but_valid_primary_is_not_swapped() {
    // One good row drowning in warnings trips the low-confidence rule for
    // DEGIRO, but the twin cannot do better, so the primary result (and
    // its warnings) must survive.
    let content = "\
Date,Product,Action,Quantity,Price
01-03-2024,Apple Inc,Buy,10,180.25
02-03-2024,A,Buy,x,1
03-03-2024,B,Buy,x,1
04-03-2024,C,Buy,x,1
05-03-2024,D,Buy,x,1
06-03-2024,E,Buy,x,1
";
    let registry = ParserRegistry::with_all_brokers();
    let res = parse_with_escalation(
        &registry,
        BrokerId::Degiro,
        content,
        &TickerTable::curated(),
    )
    .unwrap();

    assert_eq!(res.meta.parser_version, REGISTRY_PARSER_VERSION);
    assert_eq!(res.trades.len(), 1);
    assert_eq!(res.warnings.len(), 5);
}

#[test]
fn test_zero_trades_without_twin_returns_primary() {
    let registry = ParserRegistry::with_all_brokers();
    let content = "\
Date,Ticker,Type,Currency,Quantity,Price
2024-01-01,AAPL,Dividend,USD,1,150
";
    let res = parse_with_escalation(
        &registry,
        BrokerId::Generic,
        content,
        &TickerTable::curated(),
    )
    .unwrap();
    assert!(res.trades.is_empty());
    assert_eq!(res.meta.parser_version, REGISTRY_PARSER_VERSION);
}
