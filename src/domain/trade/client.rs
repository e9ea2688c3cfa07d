//! Trades sub-client — public and private trade-history queries.

use crate::client::PoloniexClient;
use crate::domain::trade::history::{self, PAGE_CAP};
use crate::domain::trade::wire::{PrivateTradeResponse, PublicTradeResponse};
use crate::domain::trade::Trade;
use crate::error::SdkError;
use crate::shared::{Pair, Quantity};

use chrono::Utc;

/// Sub-client for trade-history queries.
///
/// Both history queries take inclusive `[start, end]` bounds in epoch
/// seconds; omitted bounds default to the last 24 hours. Returned order is
/// unspecified — sort if order matters.
pub struct Trades<'a> {
    pub(crate) client: &'a PoloniexClient,
}

impl<'a> Trades<'a> {
    /// Complete public trade history for `pair` in `[start, end]`.
    ///
    /// Internally reassembles capped pages; the result is always the full
    /// range or an error, never a silent partial.
    pub async fn public_history(
        &self,
        pair: &Pair,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Result<Vec<Trade>, SdkError> {
        let (start, end) = resolve_range(start, end);
        history::assemble(start, end, PAGE_CAP, |s, e| async move {
            let params = [
                ("currencyPair", pair.to_wire()),
                ("start", s.to_string()),
                ("end", e.to_string()),
            ];
            let value = self.client.public("returnTradeHistory", &params).await?;
            let rows: Vec<PublicTradeResponse> = serde_json::from_value(value)?;
            Ok(rows.into_iter().map(|r| r.into_trade(pair)).collect())
        })
        .await
    }

    /// The member's own trades for `pair` in `[start, end]`.
    ///
    /// Fails with [`SdkError::AuthenticationRequired`] before any transport
    /// work if the client was built without credentials.
    pub async fn my_history(
        &self,
        pair: &Pair,
        start: Option<i64>,
        end: Option<i64>,
    ) -> Result<Vec<Trade>, SdkError> {
        if !self.client.has_credentials() {
            return Err(SdkError::AuthenticationRequired);
        }
        let (start, end) = resolve_range(start, end);
        history::assemble(start, end, PAGE_CAP, |s, e| async move {
            let params = [
                ("currencyPair", pair.to_wire()),
                ("start", s.to_string()),
                ("end", e.to_string()),
            ];
            let value = self
                .client
                .trading("returnTradeHistory", &params, false)
                .await?;
            let rows: Vec<PrivateTradeResponse> = serde_json::from_value(value)?;
            Ok(rows.into_iter().map(|r| r.into_trade(pair)).collect())
        })
        .await
    }

    /// Total `(base, quote)` volume publicly traded for `pair` in
    /// `[start, end]`, counting only trades whose rate falls within the
    /// given band.
    pub async fn volume_within(
        &self,
        pair: &Pair,
        start: Option<i64>,
        end: Option<i64>,
        min_rate: Option<Quantity>,
        max_rate: Option<Quantity>,
    ) -> Result<(Quantity, Quantity), SdkError> {
        if let (Some(min), Some(max)) = (min_rate, max_rate) {
            if max < min {
                return Err(SdkError::Validation(
                    "max_rate must be >= min_rate".to_string(),
                ));
            }
        }
        let trades = self.public_history(pair, start, end).await?;
        let mut base_volume = Quantity::ZERO;
        let mut quote_volume = Quantity::ZERO;
        for trade in trades {
            if min_rate.is_some_and(|min| trade.rate < min) {
                continue;
            }
            if max_rate.is_some_and(|max| trade.rate > max) {
                continue;
            }
            base_volume += trade.amount;
            quote_volume += trade.total;
        }
        Ok((base_volume, quote_volume))
    }
}

/// Defaults: start = 24 hours ago, end = now. Bounds are inclusive.
fn resolve_range(start: Option<i64>, end: Option<i64>) -> (i64, i64) {
    let now = Utc::now().timestamp();
    (start.unwrap_or(now - 86_400), end.unwrap_or(now))
}
