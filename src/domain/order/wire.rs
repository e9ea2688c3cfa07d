//! Wire types for trading-API order responses.

use crate::shared::serde_util::{lax_u64, timestamp_str};
use crate::shared::{Quantity, Side};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One `returnOpenOrders` row.
///
/// `amount` is the remaining size; `startingAmount` the original, when the
/// exchange includes it.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrderResponse {
    #[serde(rename = "orderNumber", with = "lax_u64")]
    pub order_number: u64,
    #[serde(rename = "type")]
    pub side: Side,
    pub rate: Quantity,
    pub amount: Quantity,
    #[serde(rename = "startingAmount", default)]
    pub starting_amount: Option<Quantity>,
    pub total: Quantity,
    #[serde(default)]
    pub margin: u8,
}

/// `buy`/`sell`/`marginBuy`/`marginSell` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderResponse {
    #[serde(rename = "orderNumber", with = "lax_u64")]
    pub order_number: u64,
    #[serde(rename = "resultingTrades", default)]
    pub resulting_trades: Vec<ResultingTradeResponse>,
}

/// An immediate fill reported in a placement response.
///
/// These rows carry no `globalTradeID`, so they only inform the returned
/// snapshot's `remaining`; the full fills appear in `returnOrderTrades`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultingTradeResponse {
    #[serde(rename = "tradeID", with = "lax_u64")]
    pub trade_id: u64,
    #[serde(rename = "type")]
    pub side: Side,
    pub rate: Quantity,
    pub amount: Quantity,
    pub total: Quantity,
    #[serde(with = "timestamp_str")]
    pub date: DateTime<Utc>,
}

/// `moveOrder` response: the replacement order's number.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveOrderResponse {
    #[serde(rename = "orderNumber", with = "lax_u64")]
    pub order_number: u64,
}

/// One `returnOrderTrades` row. Unlike history rows these carry their pair.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderTradeResponse {
    #[serde(rename = "globalTradeID")]
    pub global_trade_id: u64,
    #[serde(rename = "tradeID", with = "lax_u64")]
    pub trade_id: u64,
    #[serde(rename = "currencyPair")]
    pub currency_pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    pub rate: Quantity,
    pub amount: Quantity,
    pub total: Quantity,
    /// Fee rate; the charged fee is `fee × amount`, rounded up to the ULP.
    pub fee: Quantity,
    #[serde(with = "timestamp_str")]
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_order_row_parses() {
        let row: OpenOrderResponse = serde_json::from_str(
            r#"{
                "orderNumber": "120466",
                "type": "sell",
                "rate": "0.025",
                "startingAmount": "100",
                "amount": "100",
                "total": "2.5",
                "date": "2016-04-05 08:08:40",
                "margin": 0
            }"#,
        )
        .unwrap();
        assert_eq!(row.order_number, 120466);
        assert_eq!(row.side, Side::Sell);
        assert_eq!(row.starting_amount, Some("100".parse().unwrap()));
    }

    #[test]
    fn test_placement_response_with_instant_fills() {
        let resp: PlaceOrderResponse = serde_json::from_str(
            r#"{
                "orderNumber": "31226040",
                "resultingTrades": [{
                    "amount": "338.8732",
                    "date": "2014-10-18 23:03:21",
                    "rate": "0.00000173",
                    "total": "0.00058625",
                    "tradeID": "16164",
                    "type": "buy"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(resp.order_number, 31226040);
        assert_eq!(resp.resulting_trades.len(), 1);
        assert_eq!(
            resp.resulting_trades[0].amount,
            "338.8732".parse().unwrap()
        );
    }

    #[test]
    fn test_placement_response_without_fills() {
        let resp: PlaceOrderResponse =
            serde_json::from_str(r#"{"orderNumber": "514845991795"}"#).unwrap();
        assert!(resp.resulting_trades.is_empty());
    }
}
