//! Conversions from wire types to domain types for market data.

use super::wire::{OrderBookResponse, TickerResponse};
use super::{BookEntry, OrderBook, PairInfo, Ticker};
use crate::shared::Quantity;

impl From<TickerResponse> for Ticker {
    fn from(t: TickerResponse) -> Self {
        Self {
            highest_bid: t.highest_bid,
            lowest_ask: t.lowest_ask,
            last: t.last,
            base_volume: t.base_volume,
            quote_volume: t.quote_volume,
            percent_change: t.percent_change,
        }
    }
}

impl From<OrderBookResponse> for OrderBook {
    fn from(b: OrderBookResponse) -> Self {
        let entry = |e: super::wire::BookEntryResponse| BookEntry {
            rate: e.rate,
            amount: e.amount,
        };
        Self {
            bids: b.bids.into_iter().map(entry).collect(),
            asks: b.asks.into_iter().map(entry).collect(),
        }
    }
}

impl PairInfo {
    /// Exchange-wide uniform resolution.
    pub(crate) fn uniform() -> Self {
        Self {
            base_ulp: Quantity::ulp(),
            quote_ulp: Quantity::ulp(),
        }
    }
}
