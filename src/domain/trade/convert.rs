//! Conversions from wire rows to `Trade`.
//!
//! Trade-history rows do not repeat the pair they were queried for, so the
//! conversions take it as a parameter.

use super::wire::{PrivateTradeResponse, PublicTradeResponse};
use super::Trade;
use crate::shared::Pair;

impl PublicTradeResponse {
    pub(crate) fn into_trade(self, pair: &Pair) -> Trade {
        Trade {
            global_id: self.global_trade_id,
            trade_id: self.trade_id,
            order_id: None,
            side: self.side,
            subtype: None,
            pair: pair.clone(),
            rate: self.rate,
            amount: self.amount,
            total: self.total,
            fee: None,
            timestamp: self.date,
        }
    }
}

impl PrivateTradeResponse {
    pub(crate) fn into_trade(self, pair: &Pair) -> Trade {
        // The wire `fee` is a rate; the charged amount rounds up to the ULP.
        let fee = (self.fee * self.amount).ceil_to_ulp();
        Trade {
            global_id: self.global_trade_id,
            trade_id: self.trade_id,
            order_id: Some(self.order_number),
            side: self.side,
            subtype: Some(self.category),
            pair: pair.clone(),
            rate: self.rate,
            amount: self.amount,
            total: self.total,
            fee: Some(fee),
            timestamp: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{OrderSubtype, Quantity, Side};

    fn pair() -> Pair {
        "ETH/BTC".parse().unwrap()
    }

    fn q(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn sample_private(amount: &str, fee_rate: &str) -> PrivateTradeResponse {
        serde_json::from_str(&format!(
            r#"{{
                "globalTradeID": 25129732,
                "tradeID": "6325758",
                "orderNumber": "34296745",
                "date": "2016-04-05 08:08:40",
                "type": "buy",
                "category": "marginTrade",
                "rate": "0.02565498",
                "amount": "{amount}",
                "total": "0.00256549",
                "fee": "{fee_rate}"
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_public_trade_has_no_fee_or_order() {
        let row: PublicTradeResponse = serde_json::from_str(
            r#"{
                "globalTradeID": 191515395,
                "tradeID": 3212261,
                "date": "2017-04-01 00:13:37",
                "type": "sell",
                "rate": "0.02509999",
                "amount": "17.66930908",
                "total": "0.44349938"
            }"#,
        )
        .unwrap();
        let trade = row.into_trade(&pair());
        assert_eq!(trade.fee, None);
        assert_eq!(trade.order_id, None);
        assert_eq!(trade.subtype, None);
        assert_eq!(trade.pair, pair());
    }

    #[test]
    fn test_private_trade_fee_is_rate_times_amount() {
        let trade = sample_private("0.10000000", "0.00200000").into_trade(&pair());
        // 0.002 * 0.1 = 0.0002, an exact ULP multiple: unchanged.
        assert_eq!(trade.fee, Some(q("0.00020000")));
        assert_eq!(trade.order_id, Some(34296745));
        assert_eq!(trade.subtype, Some(OrderSubtype::Margin));
        assert_eq!(trade.side, Side::Buy);
    }

    #[test]
    fn test_private_trade_fee_rounds_up_never_to_nearest() {
        // 0.0025 * 0.00000003 = 0.000000000000075 — far below a ULP, and
        // nearest-rounding would drop it to zero. It must charge one ULP.
        let trade = sample_private("0.00000003", "0.00250000").into_trade(&pair());
        assert_eq!(trade.fee, Some(q("0.00000001")));
    }
}
