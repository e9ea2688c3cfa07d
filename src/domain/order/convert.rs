//! Conversions from wire rows to `Order` and per-order `Trade`s.

use super::wire::{OpenOrderResponse, OrderTradeResponse, PlaceOrderResponse};
use super::{Order, OrderStatus};
use crate::domain::trade::Trade;
use crate::error::SdkError;
use crate::shared::{OrderSubtype, Pair, Quantity, Side};

impl OpenOrderResponse {
    pub(crate) fn into_order(self, pair: &Pair) -> Order {
        let subtype = if self.margin == 1 {
            OrderSubtype::Margin
        } else {
            OrderSubtype::Exchange
        };
        // `amount` is what is left; fall back to it as the original size
        // when the exchange omits `startingAmount`.
        let remaining = self.amount;
        let amount = self.starting_amount.unwrap_or(remaining);
        Order {
            id: self.order_number,
            side: self.side,
            subtype,
            pair: pair.clone(),
            rate: self.rate,
            amount,
            remaining,
            status: OrderStatus::Open,
        }
    }
}

impl Order {
    /// Build the snapshot a placement call returns. Immediate fills reduce
    /// `remaining`; a fully filled order is already closed.
    pub(crate) fn from_placement(
        resp: PlaceOrderResponse,
        side: Side,
        subtype: OrderSubtype,
        pair: Pair,
        rate: Quantity,
        amount: Quantity,
    ) -> Order {
        let filled: Quantity = resp.resulting_trades.iter().map(|t| t.amount).sum();
        let remaining = amount - filled;
        let status = if remaining.is_zero() {
            OrderStatus::Closed
        } else {
            OrderStatus::Open
        };
        Order {
            id: resp.order_number,
            side,
            subtype,
            pair,
            rate,
            amount,
            remaining,
            status,
        }
    }
}

impl OrderTradeResponse {
    pub(crate) fn into_trade(self, order_id: u64) -> Result<Trade, SdkError> {
        let pair = Pair::from_wire(&self.currency_pair)?;
        let fee = (self.fee * self.amount).ceil_to_ulp();
        Ok(Trade {
            global_id: self.global_trade_id,
            trade_id: self.trade_id,
            order_id: Some(order_id),
            side: self.side,
            subtype: None,
            pair,
            rate: self.rate,
            amount: self.amount,
            total: self.total,
            fee: Some(fee),
            timestamp: self.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn placement(amounts: &[&str]) -> PlaceOrderResponse {
        let trades = amounts
            .iter()
            .map(|a| {
                format!(
                    r#"{{"amount":"{a}","date":"2014-10-18 23:03:21","rate":"0.05","total":"1","tradeID":"1","type":"buy"}}"#
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        serde_json::from_str(&format!(
            r#"{{"orderNumber":"31226040","resultingTrades":[{trades}]}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_placement_with_no_fills_is_fully_open() {
        let order = Order::from_placement(
            placement(&[]),
            Side::Buy,
            OrderSubtype::Exchange,
            "ETH/BTC".parse().unwrap(),
            q("0.05"),
            q("100.0"),
        );
        assert_eq!(order.remaining, q("100.0"));
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.total(), q("5.00000000"));
    }

    #[test]
    fn test_placement_with_partial_fill_reduces_remaining() {
        let order = Order::from_placement(
            placement(&["30", "20.5"]),
            Side::Buy,
            OrderSubtype::Exchange,
            "ETH/BTC".parse().unwrap(),
            q("0.05"),
            q("100"),
        );
        assert_eq!(order.remaining, q("49.5"));
        assert_eq!(order.status, OrderStatus::Open);
    }

    #[test]
    fn test_placement_fully_filled_is_closed() {
        let order = Order::from_placement(
            placement(&["60", "40"]),
            Side::Sell,
            OrderSubtype::Exchange,
            "ETH/BTC".parse().unwrap(),
            q("0.05"),
            q("100"),
        );
        assert!(order.remaining.is_zero());
        assert_eq!(order.status, OrderStatus::Closed);
    }

    #[test]
    fn test_open_order_margin_flag_sets_subtype() {
        let row: OpenOrderResponse = serde_json::from_str(
            r#"{"orderNumber":"1","type":"buy","rate":"0.02","amount":"5","startingAmount":"8","total":"0.1","margin":1}"#,
        )
        .unwrap();
        let order = row.into_order(&"ETH/BTC".parse().unwrap());
        assert_eq!(order.subtype, OrderSubtype::Margin);
        assert_eq!(order.amount, q("8"));
        assert_eq!(order.remaining, q("5"));
    }

    #[test]
    fn test_order_trade_decodes_its_own_pair() {
        let row: OrderTradeResponse = serde_json::from_str(
            r#"{
                "globalTradeID": 20825863,
                "tradeID": 147142,
                "currencyPair": "BTC_XVC",
                "type": "buy",
                "rate": "0.00018500",
                "amount": "455.34206390",
                "total": "0.08423828",
                "fee": "0.00200000",
                "date": "2016-03-14 01:04:36"
            }"#,
        )
        .unwrap();
        let trade = row.into_trade(739_730_318).unwrap();
        assert_eq!(trade.pair, "XVC/BTC".parse().unwrap());
        assert_eq!(trade.order_id, Some(739_730_318));
        // 0.002 * 455.34206390 = 0.9106841278, ceiled at the 8th place.
        assert_eq!(trade.fee, Some(q("0.91068413")));
    }
}
