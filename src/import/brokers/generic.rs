use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

// The canonical Date,Ticker,Type,Currency,Quantity,Price layout, plus the
// alias spread needed to absorb exports the signature table has no specific
// rule for. Month-first here covers US-style slash dates; ISO always parses.
static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Generic,
    display_name: "Generic CSV",
    date_convention: DateConvention::MonthDayYearSlash,
    default_currency: "USD",
    aliases: FieldAliases {
        date: &["date", "timestamp", "time", "trade date", "transaction date"],
        ticker: &["ticker", "symbol", "asset", "instrument"],
        instrument: &["security", "stock", "product", "description"],
        action: &["type", "action", "side", "direction", "buy/sell"],
        quantity: &["quantity", "qty", "shares", "units", "no. of shares"],
        price: &["price", "rate", "unit price"],
        total: &["total", "value"],
        currency: &["currency", "ccy"],
        fee: &["fee", "fees", "commission"],
    },
};

pub fn parser() -> TableParser {
    TableParser { profile: &PROFILE, quirks: RowQuirks::default() }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::import::tickers::TickerTable;

    #[test]
    fn test_canonical_layout() {
        let content = "\
Date,Ticker,Type,Currency,Quantity,Price
2024-01-01,AAPL,BUY,USD,10,150.00
2024-01-02,AAPL,SELL,USD,5,155.00
";
        let res = super::parser()
            .parse(content, &TickerTable::curated())
            .unwrap();
        assert_eq!(res.trades.len(), 2);
        assert_eq!(res.trades[0].qty, dec!(10));
        assert!(res.trades[0].raw_hash.is_some());
    }

    #[test]
    fn test_price_derived_from_total() {
        // No price column; total divided by quantity stands in.
        let content = "\
Date,Ticker,Type,Quantity,Total
2024-01-01,AAPL,BUY,10,1500.00
";
        let res = super::parser()
            .parse(content, &TickerTable::curated())
            .unwrap();
        assert_eq!(res.trades.len(), 1);
        assert_eq!(res.trades[0].price, dec!(150));
        assert!(res.warnings.is_empty());
    }
}
