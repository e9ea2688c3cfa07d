//! High-level client — `PoloniexClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, the shared metadata caches, and the gate every
//! trading-API call passes through.

use crate::auth::Credentials;
use crate::confirm::ConfirmPolicy;
use crate::domain::balance::client::Balances;
use crate::domain::market::client::Markets;
use crate::domain::order::client::Orders;
use crate::domain::trade::client::Trades;
use crate::error::SdkError;
use crate::http::{PoloniexHttp, RetryConfig, RetryPolicy};
use crate::trace::{CallSink, LogSink};

use async_lock::{Mutex, RwLock};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// The primary entry point for the Poloniex SDK.
///
/// Built via [`PoloniexClient::builder`]; cheap to clone, and clones share
/// the same transport pacing, nonce sequence, caches, and confirmation gate.
/// Provides sub-client accessors per domain: `client.markets()`,
/// `client.balances()`, `client.orders()`, `client.trades()`.
#[derive(Clone)]
pub struct PoloniexClient {
    pub(crate) http: Arc<PoloniexHttp>,
    confirm: Option<Arc<dyn ConfirmPolicy>>,
    /// Serializes confirmation prompts across concurrent calls.
    confirm_gate: Arc<Mutex<()>>,
    /// Process-lifetime metadata caches; see [`Markets`].
    pub(crate) currencies_cache: Arc<RwLock<Option<Arc<BTreeSet<crate::shared::Currency>>>>>,
    pub(crate) pairs_cache: Arc<RwLock<Option<Arc<BTreeSet<crate::shared::Pair>>>>>,
}

impl PoloniexClient {
    pub fn builder() -> PoloniexClientBuilder {
        PoloniexClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn balances(&self) -> Balances<'_> {
        Balances { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn trades(&self) -> Trades<'_> {
        Trades { client: self }
    }

    /// Whether the client was built with trading-API credentials.
    pub fn has_credentials(&self) -> bool {
        self.http.has_credentials()
    }

    /// Drop the process-lifetime metadata caches (currency list, pair set).
    pub async fn invalidate_metadata(&self) {
        self.markets().invalidate().await;
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    pub(crate) async fn public(
        &self,
        command: &str,
        params: &[(&str, String)],
    ) -> Result<Value, SdkError> {
        self.http.public(command, params).await
    }

    /// Every trading-API call funnels through here: credential check, then
    /// the confirmation gate, then dispatch. A declined confirmation aborts
    /// before any request exists to send.
    pub(crate) async fn trading(
        &self,
        command: &str,
        params: &[(&str, String)],
        mutating: bool,
    ) -> Result<Value, SdkError> {
        if !self.http.has_credentials() {
            return Err(SdkError::AuthenticationRequired);
        }
        if let Some(policy) = &self.confirm {
            let _prompt = self.confirm_gate.lock().await;
            if !policy.confirm(&summarize(command, params)) {
                return Err(SdkError::ConfirmationDeclined);
            }
        }
        self.http.trading(command, params, mutating).await
    }
}

/// Credential-free rendering of a trading call for confirmation prompts.
fn summarize(command: &str, params: &[(&str, String)]) -> String {
    let mut summary = format!("command={command}");
    for (key, value) in params {
        summary.push('&');
        summary.push_str(key);
        summary.push('=');
        summary.push_str(value);
    }
    summary
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PoloniexClientBuilder {
    public_url: String,
    trading_url: String,
    credentials: Option<Credentials>,
    min_nonce: Option<u64>,
    confirm: Option<Arc<dyn ConfirmPolicy>>,
    trace: Option<Arc<dyn CallSink>>,
    read_retry: RetryPolicy,
}

impl Default for PoloniexClientBuilder {
    fn default() -> Self {
        Self {
            public_url: crate::network::DEFAULT_PUBLIC_URL.to_string(),
            trading_url: crate::network::DEFAULT_TRADING_URL.to_string(),
            credentials: None,
            min_nonce: None,
            confirm: None,
            trace: None,
            read_retry: RetryPolicy::None,
        }
    }
}

impl PoloniexClientBuilder {
    pub fn public_url(mut self, url: &str) -> Self {
        self.public_url = url.to_string();
        self
    }

    pub fn trading_url(mut self, url: &str) -> Self {
        self.trading_url = url.to_string();
        self
    }

    /// Member credentials for the trading API.
    pub fn credentials(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(key, secret));
        self
    }

    /// Floor for the signing nonce. Needed after the key was used from a
    /// machine whose clock ran ahead.
    pub fn min_nonce(mut self, min_nonce: u64) -> Self {
        self.min_nonce = Some(min_nonce);
        self
    }

    /// Require confirmation from `policy` before every trading-API call.
    pub fn confirm(mut self, policy: impl ConfirmPolicy + 'static) -> Self {
        self.confirm = Some(Arc::new(policy));
        self
    }

    /// Send every call and its result-or-error to `sink`.
    pub fn trace(mut self, sink: impl CallSink + 'static) -> Self {
        self.trace = Some(Arc::new(sink));
        self
    }

    /// Trace calls to the `tracing` subscriber.
    pub fn log_calls(self) -> Self {
        self.trace(LogSink)
    }

    /// Opt public reads into the stock idempotent retry policy. Trading
    /// calls never retry regardless.
    pub fn retry_reads(mut self) -> Self {
        self.read_retry = RetryPolicy::Idempotent;
        self
    }

    /// Opt public reads into a custom retry configuration.
    pub fn read_retry(mut self, config: RetryConfig) -> Self {
        self.read_retry = RetryPolicy::Custom(config);
        self
    }

    pub fn build(self) -> Result<PoloniexClient, SdkError> {
        Ok(PoloniexClient {
            http: Arc::new(PoloniexHttp::new(
                &self.public_url,
                &self.trading_url,
                self.credentials,
                self.min_nonce,
                self.read_retry,
                self.trace,
            )),
            confirm: self.confirm,
            confirm_gate: Arc::new(Mutex::new(())),
            currencies_cache: Arc::new(RwLock::new(None)),
            pairs_cache: Arc::new(RwLock::new(None)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_renders_command_and_params() {
        let summary = summarize(
            "buy",
            &[
                ("currencyPair", "BTC_ETH".to_string()),
                ("rate", "0.05".to_string()),
            ],
        );
        assert_eq!(summary, "command=buy&currencyPair=BTC_ETH&rate=0.05");
    }
}
