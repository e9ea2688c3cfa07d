//! Market metadata domain — currencies, tickers, order books.

pub mod client;
mod convert;
pub mod wire;

use crate::shared::Quantity;
use serde::{Deserialize, Serialize};

/// Current ticker values for a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    pub highest_bid: Quantity,
    pub lowest_ask: Quantity,
    /// Rate of the most recent trade.
    pub last: Quantity,
    pub base_volume: Quantity,
    pub quote_volume: Quantity,
    pub percent_change: Quantity,
}

/// Static metadata for a pair.
///
/// The exchange uses a uniform 1e-8 resolution for every currency, so both
/// ULPs are currently constant; they are still per-pair in the type in case
/// that ever changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairInfo {
    pub base_ulp: Quantity,
    pub quote_ulp: Quantity,
}

/// One resting offer in an order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub rate: Quantity,
    pub amount: Quantity,
}

/// Aggregated order book for a pair.
///
/// Bids descend by rate, asks ascend, as the exchange returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub bids: Vec<BookEntry>,
    pub asks: Vec<BookEntry>,
}
