//! Trade domain — executed fills, trade history, pagination stitching.

pub mod client;
mod convert;
pub mod history;
pub mod wire;

use crate::shared::{OrderSubtype, Pair, Quantity, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An executed fill — an immutable historical fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Exchange-wide stable identifier. Two distinct trades can share every
    /// visible field, so this is the identity used when merging pages.
    pub global_id: u64,
    /// Per-pair trade id.
    pub trade_id: u64,
    /// The order this fill executed against, when the exchange reports it
    /// (own-trade queries only; fills can be partial or aggregated).
    pub order_id: Option<u64>,
    pub side: Side,
    /// Private history reports the order category; public trades carry none.
    pub subtype: Option<OrderSubtype>,
    pub pair: Pair,
    pub rate: Quantity,
    pub amount: Quantity,
    pub total: Quantity,
    /// Fee in the base currency, rounded up to the ULP. `None` on public
    /// trades — the exchange does not disclose other members' fees.
    pub fee: Option<Quantity>,
    pub timestamp: DateTime<Utc>,
}
