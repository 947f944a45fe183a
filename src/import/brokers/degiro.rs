use crate::broker::{BrokerId, BrokerProfile, FieldAliases};
use crate::import::engine::{RowQuirks, TableParser};
use crate::util::date::DateConvention;

static PROFILE: BrokerProfile = BrokerProfile {
    id: BrokerId::Degiro,
    display_name: "DEGIRO",
    date_convention: DateConvention::DayMonthYearDash,
    default_currency: "EUR",
    aliases: FieldAliases {
        date: &["date", "datum"],
        // No symbol column: tickers come from the product name.
        ticker: &[],
        instrument: &["product"],
        action: &["action", "buy/sell"],
        quantity: &["quantity", "number"],
        price: &["price"],
        total: &["total", "value"],
        currency: &["currency"],
        fee: &["transaction costs", "fee"],
    },
};

pub fn parser() -> TableParser {
    TableParser { profile: &PROFILE, quirks: RowQuirks::default() }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    use crate::import::model::TradeAction;
    use crate::import::tickers::TickerTable;

    #[test]
    fn test_product_name_resolution() {
        let content = "\
Date,Product,Action,Quantity,Price,Currency
01-03-2024,Apple Inc,Buy,10,180.25,USD
02-03-2024,Some Obscure Fund,Sell,5,20.00,EUR
";
        let res = super::parser()
            .parse(content, &TickerTable::curated())
            .unwrap();
        assert_eq!(res.trades.len(), 2);

        let apple = &res.trades[0];
        assert_eq!(apple.ticker, "AAPL");
        assert_eq!(apple.action, TradeAction::Buy);
        assert_eq!(apple.qty, dec!(10));
        // Day-first dashed dates.
        assert_eq!(apple.date, datetime!(2024-03-01 00:00:00 UTC));

        // Unmapped names fall back to the uppercased product text.
        assert_eq!(res.trades[1].ticker, "SOME OBSCURE FUND");
    }
}
