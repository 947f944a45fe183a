use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Kraken,
    display_name: "Kraken",
    date_convention: DateConvention::Iso,
    default_currency: "USD",
    aliases: FieldAliases {
        date: &["time", "date"],
        ticker: &["pair", "asset"],
        instrument: &[],
        action: &["type"],
        quantity: &["vol", "volume", "amount"],
        price: &["price"],
        total: &["cost"],
        currency: &[],
        fee: &["fee"],
    },
};

pub fn parser() -> TableParser {
    TableParser {
        profile: &PROFILE,
        quirks: RowQuirks {
            pair_quote_currency: true,
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
    fn test_trades_export_layout() {
        let content = "\
txid,ordertxid,pair,time,type,ordertype,price,cost,fee,vol
ABC123,OGRQC4,XBT/EUR,2024-05-01 10:00:00,buy,limit,58000.0,580.00,0.93,0.01
DEF456,OGRQC5,ETH/USD,2024-05-02 11:30:00,sell,market,3000.0,6000.00,9.60,2
";
        let res = super::parser()
            .parse(content, &TickerTable::curated())
            .unwrap();
        assert_eq!(res.trades.len(), 2);

        let xbt = &res.trades[0];
        assert_eq!(xbt.ticker, "XBT");
        assert_eq!(xbt.action, TradeAction::Buy);
        assert_eq!(xbt.qty, dec!(0.01));
        assert_eq!(xbt.price, dec!(58000.0));
        // Quote leg of the pair is the currency.
        assert_eq!(xbt.currency, "EUR");
        assert_eq!(xbt.fees, dec!(0.93));

        assert_eq!(res.trades[1].action, TradeAction::Sell);
        assert_eq!(res.trades[1].currency, "USD");
    }
}
