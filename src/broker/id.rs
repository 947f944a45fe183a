use std::fmt::Display;

/// Identifier for every supported export source, plus the `Unknown`
/// sentinel the sniffer falls back to. Closed set: downstream consumers
/// match on this exhaustively.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BrokerId {
    Trading212,
    Etoro,
    Coinbase,
    Ibkr,
    Freetrade,
    Revolut,
    Degiro,
    Binance,
    Kraken,
    Webull,
    Generic,
    Unknown,
}

impl BrokerId {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrokerId::Trading212 => "trading212",
            BrokerId::Etoro => "etoro",
            BrokerId::Coinbase => "coinbase",
            BrokerId::Ibkr => "ibkr",
            BrokerId::Freetrade => "freetrade",
            BrokerId::Revolut => "revolut",
            BrokerId::Degiro => "degiro",
            BrokerId::Binance => "binance",
            BrokerId::Kraken => "kraken",
            BrokerId::Webull => "webull",
            BrokerId::Generic => "generic",
            BrokerId::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BrokerId::Trading212 => "Trading 212",
            BrokerId::Etoro => "eToro",
            BrokerId::Coinbase => "Coinbase",
            BrokerId::Ibkr => "Interactive Brokers",
            BrokerId::Freetrade => "Freetrade",
            BrokerId::Revolut => "Revolut",
            BrokerId::Degiro => "DEGIRO",
            BrokerId::Binance => "Binance",
            BrokerId::Kraken => "Kraken",
            BrokerId::Webull => "Webull",
            BrokerId::Generic => "Generic CSV",
            BrokerId::Unknown => "Unknown",
        }
    }

    /// Parses a user-supplied id string (e.g. a manual override flag).
    pub fn parse(s: &str) -> Option<BrokerId> {
        let all = [
            BrokerId::Trading212,
            BrokerId::Etoro,
            BrokerId::Coinbase,
            BrokerId::Ibkr,
            BrokerId::Freetrade,
            BrokerId::Revolut,
            BrokerId::Degiro,
            BrokerId::Binance,
            BrokerId::Kraken,
            BrokerId::Webull,
            BrokerId::Generic,
        ];
        let lower = s.trim().to_lowercase();
        all.into_iter().find(|id| id.as_str() == lower)
    }
}

impl Display for BrokerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl serde::Serialize for BrokerId {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
