pub mod brokers;
pub mod engine;
pub mod fallback;
pub mod model;
pub mod normalize;
pub mod registry;
pub mod table;
pub mod tickers;

pub use model::{
    FatalInputError, NormalizedTrade, ParseMeta, ParseResult, RawInput,
    TradeAction,
};

use crate::broker::{sniff, BrokerId};
use registry::ParserRegistry;
use tickers::TickerTable;

/// The assembled engine: sniffer, registry, escalation policy, and the
/// injected ticker configuration. Holds no mutable state; one instance can
/// serve any number of concurrent imports.
pub struct Importer {
    registry: ParserRegistry,
    tickers: TickerTable,
}

impl Importer {
    pub fn new(registry: ParserRegistry, tickers: TickerTable) -> Importer {
        Importer { registry, tickers }
    }

    pub fn with_default_config() -> Importer {
        Importer::new(ParserRegistry::with_all_brokers(), TickerTable::curated())
    }

    /// Content-sniffs the input. `BrokerId::Unknown` means "ask the user",
    /// never an error.
    pub fn sniff(&self, input: &RawInput) -> BrokerId {
        sniff::sniff(input.sniff_sample())
    }

    /// The full pipeline: sniff, dispatch, escalate, validate.
    pub fn import(&self, input: &RawInput) -> Result<ParseResult, FatalInputError> {
        let id = self.sniff(input);
        self.import_as(id, input)
    }

    /// Parses with an explicitly chosen broker, bypassing the sniffer.
    /// This is the manual-selection path after an unrecognized format.
    pub fn import_as(
        &self,
        id: BrokerId,
        input: &RawInput,
    ) -> Result<ParseResult, FatalInputError> {
        fallback::parse_with_escalation(
            &self.registry,
            id,
            input.content(),
            &self.tickers,
        )
    }
}

impl Default for Importer {
    fn default() -> Self {
        Importer::with_default_config()
    }
}
