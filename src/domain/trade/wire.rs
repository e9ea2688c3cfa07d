//! Wire types for trade-history responses.

use crate::shared::serde_util::{lax_u64, timestamp_str};
use crate::shared::{OrderSubtype, Quantity, Side};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One public `returnTradeHistory` row.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicTradeResponse {
    #[serde(rename = "globalTradeID")]
    pub global_trade_id: u64,
    #[serde(rename = "tradeID", with = "lax_u64")]
    pub trade_id: u64,
    #[serde(with = "timestamp_str")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub side: Side,
    pub rate: Quantity,
    pub amount: Quantity,
    pub total: Quantity,
}

/// One private `returnTradeHistory` row.
///
/// `fee` is a rate, not an amount: the charged fee is `fee × amount`,
/// rounded up to the ULP.
#[derive(Debug, Clone, Deserialize)]
pub struct PrivateTradeResponse {
    #[serde(rename = "globalTradeID")]
    pub global_trade_id: u64,
    #[serde(rename = "tradeID", with = "lax_u64")]
    pub trade_id: u64,
    #[serde(rename = "orderNumber", with = "lax_u64")]
    pub order_number: u64,
    #[serde(with = "timestamp_str")]
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub side: Side,
    pub category: OrderSubtype,
    pub rate: Quantity,
    pub amount: Quantity,
    pub total: Quantity,
    pub fee: Quantity,
}
