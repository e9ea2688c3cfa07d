//! Order domain — placement, open-order queries, cancellation.

pub mod client;
mod convert;
pub mod wire;

pub use client::PlaceOptions;

use crate::shared::{OrderSubtype, Pair, Quantity, Side};
use serde::{Deserialize, Serialize};

/// Whether an order is still resting on the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Open,
    Closed,
}

/// A snapshot of one of the member's orders.
///
/// Snapshots describe remote state at fetch time; the client keeps no
/// persistent local order book. Re-query to observe fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The exchange's order number.
    pub id: u64,
    pub side: Side,
    pub subtype: OrderSubtype,
    pub pair: Pair,
    /// Limit rate in the quote currency.
    pub rate: Quantity,
    /// Original size in the base currency.
    pub amount: Quantity,
    /// Base-currency amount not yet filled.
    pub remaining: Quantity,
    pub status: OrderStatus,
}

impl Order {
    /// Quote-currency size: rate × amount.
    pub fn total(&self) -> Quantity {
        self.rate * self.amount
    }

    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_exact_product() {
        let order = Order {
            id: 1,
            side: Side::Buy,
            subtype: OrderSubtype::Exchange,
            pair: "ETH/BTC".parse().unwrap(),
            rate: "0.05".parse().unwrap(),
            amount: "100.0".parse().unwrap(),
            remaining: "100.0".parse().unwrap(),
            status: OrderStatus::Open,
        };
        assert_eq!(order.total(), "5.00000000".parse().unwrap());
        assert!(order.is_open());
    }
}
