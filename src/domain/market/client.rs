//! Markets sub-client — currencies, tickers, pair metadata, order books.

use crate::client::PoloniexClient;
use crate::domain::market::wire::{OrderBookResponse, TickerResponse};
use crate::domain::market::{OrderBook, PairInfo, Ticker};
use crate::error::SdkError;
use crate::shared::{Currency, Pair};

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Sub-client for market metadata and public market data.
///
/// The currency list and the pair set are cached for the process lifetime:
/// fetched on first use and reused until [`invalidate`](Markets::invalidate)
/// is called. Ticker and order-book data are always fetched live.
pub struct Markets<'a> {
    pub(crate) client: &'a PoloniexClient,
}

impl<'a> Markets<'a> {
    /// Every currency the exchange lists. Cached.
    pub async fn currencies(&self) -> Result<Arc<BTreeSet<Currency>>, SdkError> {
        {
            let cache = self.client.currencies_cache.read().await;
            if let Some(list) = cache.as_ref() {
                return Ok(list.clone());
            }
        }

        let value = self.client.public("returnCurrencies", &[]).await?;
        let map: BTreeMap<Currency, serde_json::Value> = serde_json::from_value(value)?;
        let list = Arc::new(map.into_keys().collect::<BTreeSet<_>>());
        *self.client.currencies_cache.write().await = Some(list.clone());
        Ok(list)
    }

    /// Every tradable pair. Cached.
    pub async fn pairs(&self) -> Result<Arc<BTreeSet<Pair>>, SdkError> {
        {
            let cache = self.client.pairs_cache.read().await;
            if let Some(set) = cache.as_ref() {
                return Ok(set.clone());
            }
        }

        let set = Arc::new(self.ticker_all().await?.into_keys().collect::<BTreeSet<_>>());
        *self.client.pairs_cache.write().await = Some(set.clone());
        Ok(set)
    }

    /// Drop the process-lifetime metadata caches.
    pub async fn invalidate(&self) {
        *self.client.currencies_cache.write().await = None;
        *self.client.pairs_cache.write().await = None;
    }

    /// Live ticker for every pair.
    pub async fn ticker_all(&self) -> Result<BTreeMap<Pair, Ticker>, SdkError> {
        let value = self.client.public("returnTicker", &[]).await?;
        let raw: BTreeMap<String, TickerResponse> = serde_json::from_value(value)?;
        let mut ticker = BTreeMap::new();
        for (wire_pair, row) in raw {
            ticker.insert(Pair::from_wire(&wire_pair)?, Ticker::from(row));
        }
        Ok(ticker)
    }

    /// Live ticker for one pair.
    pub async fn ticker(&self, pair: &Pair) -> Result<Ticker, SdkError> {
        self.ticker_all()
            .await?
            .remove(pair)
            .ok_or_else(|| SdkError::NotFound(format!("nonexistent currency pair {pair:?}")))
    }

    /// Static metadata for one pair.
    pub async fn pair_info(&self, pair: &Pair) -> Result<PairInfo, SdkError> {
        if !self.pairs().await?.contains(pair) {
            return Err(SdkError::NotFound(format!(
                "nonexistent currency pair {pair:?}"
            )));
        }
        Ok(PairInfo::uniform())
    }

    /// Order book for one pair, at least `depth` entries per side.
    pub async fn order_book(&self, pair: &Pair, depth: u32) -> Result<OrderBook, SdkError> {
        if depth == 0 {
            return Err(SdkError::Validation("depth must be positive".to_string()));
        }
        let params = [
            ("currencyPair", pair.to_wire()),
            ("depth", depth.to_string()),
        ];
        let value = self.client.public("returnOrderBook", &params).await?;
        let raw: OrderBookResponse = serde_json::from_value(value)?;
        Ok(raw.into())
    }

    /// Order books for every pair.
    pub async fn order_book_all(
        &self,
        depth: u32,
    ) -> Result<BTreeMap<Pair, OrderBook>, SdkError> {
        if depth == 0 {
            return Err(SdkError::Validation("depth must be positive".to_string()));
        }
        let params = [
            ("currencyPair", "all".to_string()),
            ("depth", depth.to_string()),
        ];
        let value = self.client.public("returnOrderBook", &params).await?;
        let raw: BTreeMap<String, OrderBookResponse> = serde_json::from_value(value)?;
        let mut books = BTreeMap::new();
        for (wire_pair, book) in raw {
            books.insert(Pair::from_wire(&wire_pair)?, book.into());
        }
        Ok(books)
    }
}
