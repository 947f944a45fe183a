use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Ibkr,
    display_name: "Interactive Brokers",
    date_convention: DateConvention::Iso,
    default_currency: "USD",
    aliases: FieldAliases {
        date: &["date", "date/time", "trade date"],
        ticker: &["symbol"],
        instrument: &["description", "security"],
        action: &["action", "type", "buy/sell"],
        quantity: &["quantity", "qty"],
        price: &["t.price", "price", "trade price"],
        total: &["proceeds"],
        currency: &["currency"],
        fee: &["comm/fee", "commission", "comm in usd"],
    },
};

pub fn parser() -> TableParser {
    TableParser {
        profile: &PROFILE,
        quirks: RowQuirks {
            // Flex statements carry no action column; the sign of
            // Quantity/Proceeds is the action.
            infer_action_from_signs: true,
            ..RowQuirks::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::import::model::TradeAction;
    use crate::import::tickers::TickerTable;

    #[test]
    fn test_flex_sign_inference() {
        let content = "\
Date,Symbol,Quantity,T.Price,Proceeds,Comm/Fee,Currency
2024-03-01,AAPL,100,150.00,-15000.00,-1.00,USD
2024-03-02,AAPL,-40,155.00,6200.00,-1.00,USD
";
        let res = super::parser()
            .parse(content, &TickerTable::curated())
            .unwrap();
        assert_eq!(res.trades.len(), 2);
        assert_eq!(res.trades[0].action, TradeAction::Buy);
        assert_eq!(res.trades[1].action, TradeAction::Sell);
        assert_eq!(res.trades[1].qty, dec!(40));
        assert_eq!(res.trades[0].fees, dec!(1.00));
    }
}
