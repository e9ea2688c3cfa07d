//! Wire types for public market-data responses.

use crate::shared::serde_util::LaxQuantity;
use crate::shared::Quantity;
use serde::{Deserialize, Deserializer};

/// One `returnTicker` row, keyed by the wire pair string in the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerResponse {
    #[serde(rename = "highestBid")]
    pub highest_bid: Quantity,
    #[serde(rename = "lowestAsk")]
    pub lowest_ask: Quantity,
    pub last: Quantity,
    #[serde(rename = "baseVolume")]
    pub base_volume: Quantity,
    #[serde(rename = "quoteVolume")]
    pub quote_volume: Quantity,
    #[serde(rename = "percentChange")]
    pub percent_change: Quantity,
}

/// One `[rate, amount]` order-book entry.
///
/// The exchange quotes the rate but sends the amount as a bare number.
#[derive(Debug, Clone)]
pub struct BookEntryResponse {
    pub rate: Quantity,
    pub amount: Quantity,
}

impl<'de> Deserialize<'de> for BookEntryResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (rate, amount): (LaxQuantity, LaxQuantity) = Deserialize::deserialize(deserializer)?;
        Ok(BookEntryResponse {
            rate: rate.0,
            amount: amount.0,
        })
    }
}

/// `returnOrderBook` payload for a single pair.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookResponse {
    pub bids: Vec<BookEntryResponse>,
    pub asks: Vec<BookEntryResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_row_parses() {
        let row: TickerResponse = serde_json::from_str(
            r#"{
                "last": "0.02510000",
                "lowestAsk": "0.02589999",
                "highestBid": "0.02500000",
                "percentChange": "0.00250000",
                "baseVolume": "6.16485315",
                "quoteVolume": "245.82513926",
                "isFrozen": "0",
                "high24hr": "0.02590000",
                "low24hr": "0.02400000"
            }"#,
        )
        .unwrap();
        assert_eq!(row.last, "0.02510000".parse().unwrap());
        assert_eq!(row.highest_bid, "0.02500000".parse().unwrap());
    }

    #[test]
    fn test_order_book_parses_mixed_entry_types() {
        let book: OrderBookResponse = serde_json::from_str(
            r#"{
                "asks": [["0.00001941", 1234.56], ["0.00001942", 7]],
                "bids": [["0.00001900", 0.5]],
                "isFrozen": "0",
                "seq": 18849
            }"#,
        )
        .unwrap();
        assert_eq!(book.asks.len(), 2);
        assert_eq!(book.asks[0].rate, "0.00001941".parse().unwrap());
        assert_eq!(book.asks[0].amount, "1234.56".parse().unwrap());
        assert_eq!(book.bids[0].amount, "0.5".parse().unwrap());
    }
}
