use std::collections::HashMap;

use crate::broker::BrokerId;
use crate::import::brokers;
use crate::import::engine::TableParser;
use crate::import::model::{FatalInputError, ParseResult};
use crate::import::tickers::TickerTable;

/// Broker id -> parser. Built once and shared read-only across parses;
/// dispatch is a lookup, not a conditional cascade.
pub struct ParserRegistry {
    parsers: HashMap<BrokerId, TableParser>,
}

impl ParserRegistry {
    pub fn empty() -> ParserRegistry {
        ParserRegistry { parsers: HashMap::new() }
    }

    pub fn with_all_brokers() -> ParserRegistry {
        let mut r = ParserRegistry::empty();
        r.register(brokers::trading212::parser());
        r.register(brokers::etoro::parser());
        r.register(brokers::coinbase::parser());
        r.register(brokers::ibkr::parser());
        r.register(brokers::freetrade::parser());
        r.register(brokers::revolut::parser());
        r.register(brokers::degiro::parser());
        r.register(brokers::binance::parser());
        r.register(brokers::kraken::parser());
        r.register(brokers::webull::parser());
        r.register(brokers::generic::parser());
        r
    }

    pub fn register(&mut self, parser: TableParser) {
        self.parsers.insert(parser.id(), parser);
    }

    /// Mainly for tests simulating a partially-initialized registry.
    pub fn deregister(&mut self, id: BrokerId) -> Option<TableParser> {
        self.parsers.remove(&id)
    }

    pub fn contains(&self, id: BrokerId) -> bool {
        self.parsers.contains_key(&id)
    }

    /// `None` is the "no parser registered for this id" signal; callers
    /// decide whether that escalates to a fallback implementation.
    pub fn parse(
        &self,
        id: BrokerId,
        content: &str,
        tickers: &TickerTable,
    ) -> Option<Result<ParseResult, FatalInputError>> {
        self.parsers.get(&id).map(|p| p.parse(content, tickers))
    }
}
