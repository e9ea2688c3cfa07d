//! Low-level HTTP client — `PoloniexHttp`.
//!
//! Speaks the exchange's two REST surfaces: unsigned GETs against the public
//! endpoint and signed, form-encoded POSTs against the trading endpoint.
//! Decodes the exchange's error envelope (errors arrive in-band with HTTP
//! 200 as often as not) and returns raw `serde_json::Value` payloads; wire
//! parsing happens in the domain sub-clients.

use crate::auth::{Credentials, NonceSource};
use crate::error::SdkError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::trace::CallSink;

use async_lock::Mutex;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Minimum spacing between consecutive requests to the exchange.
const REQUEST_SPACING: Duration = Duration::from_millis(250);

/// Exchange error texts that mean "that thing does not exist".
const PAIR_ERRORS: [&str; 2] = ["Invalid currency pair.", "Invalid currencyPair parameter."];
const ORDER_NOT_FOUND: &str = "Order not found, or you are not the person who placed it.";

/// Low-level HTTP client for the Poloniex REST APIs.
pub struct PoloniexHttp {
    public_url: String,
    trading_url: String,
    client: Client,
    credentials: Option<Credentials>,
    nonce: NonceSource,
    read_retry: RetryPolicy,
    /// Timestamp of the last dispatched request; requests are spaced behind
    /// this lock so concurrent callers queue instead of bursting.
    last_request: Mutex<Option<Instant>>,
    trace: Option<Arc<dyn CallSink>>,
}

impl PoloniexHttp {
    pub(crate) fn new(
        public_url: &str,
        trading_url: &str,
        credentials: Option<Credentials>,
        min_nonce: Option<u64>,
        read_retry: RetryPolicy,
        trace: Option<Arc<dyn CallSink>>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self {
            public_url: public_url.trim_end_matches('/').to_string(),
            trading_url: trading_url.trim_end_matches('/').to_string(),
            client,
            credentials,
            nonce: NonceSource::new(min_nonce),
            read_retry,
            last_request: Mutex::new(None),
            trace,
        }
    }

    pub(crate) fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Issue a public-API command. Retries only if the client opted in.
    pub(crate) async fn public(
        &self,
        command: &str,
        params: &[(&str, String)],
    ) -> Result<Value, SdkError> {
        let query = encode_args(command, None, params);
        if let Some(sink) = &self.trace {
            sink.on_call(command, &query);
        }
        let url = format!("{}?{}", self.public_url, query);

        let result = match self.read_retry.config() {
            None => self.fetch_public(command, &url).await,
            Some(config) => self.fetch_public_with_retry(command, &url, config).await,
        };

        if let Some(sink) = &self.trace {
            sink.on_result(command, result.as_ref());
        }
        result
    }

    /// Issue a signed trading-API command. Never retries.
    ///
    /// `mutating` marks commands that change exchange state: a transport
    /// failure on those surfaces as [`SdkError::AmbiguousOutcome`], because
    /// the request may already have been acted on.
    pub(crate) async fn trading(
        &self,
        command: &str,
        params: &[(&str, String)],
        mutating: bool,
    ) -> Result<Value, SdkError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(SdkError::AuthenticationRequired)?;

        let nonce = self.nonce.next();
        let body = encode_args(command, Some(nonce), params);
        if let Some(sink) = &self.trace {
            sink.on_call(command, &body);
        }
        let signature = credentials.sign(&body);

        let result = self
            .dispatch_trading(command, credentials.key(), &signature, body, mutating)
            .await;

        if let Some(sink) = &self.trace {
            sink.on_result(command, result.as_ref());
        }
        result
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn fetch_public(&self, command: &str, url: &str) -> Result<Value, SdkError> {
        self.pace().await;
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        parse_response(command, status.is_success(), status.as_u16(), &text)
    }

    async fn fetch_public_with_retry(
        &self,
        command: &str,
        url: &str,
        config: RetryConfig,
    ) -> Result<Value, SdkError> {
        let mut attempt = 0;
        loop {
            match self.fetch_public(command, url).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < config.max_retries && retryable(&err, &config) => {
                    let delay = config.delay_for_attempt(attempt);
                    tracing::debug!(
                        command,
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "retrying public read"
                    );
                    futures_timer::Delay::new(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn dispatch_trading(
        &self,
        command: &str,
        key: &str,
        signature: &str,
        body: String,
        mutating: bool,
    ) -> Result<Value, SdkError> {
        self.pace().await;
        let sent = self
            .client
            .post(&self.trading_url)
            .header("Key", key)
            .header("Sign", signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await;

        let resp = sent.map_err(|e| transport_error(command, e, mutating))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| transport_error(command, e, mutating))?;
        parse_response(command, status.is_success(), status.as_u16(), &text)
    }

    /// Enforce the minimum request spacing. Concurrent callers serialize on
    /// the lock and each inherits the previous caller's timestamp.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < REQUEST_SPACING {
                futures_timer::Delay::new(REQUEST_SPACING - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// A transport failure on a mutating command is ambiguous: the request may
/// have been dispatched before the failure.
fn transport_error(command: &str, source: reqwest::Error, mutating: bool) -> SdkError {
    if mutating {
        SdkError::AmbiguousOutcome {
            command: command.to_string(),
            source,
        }
    } else {
        SdkError::Transport(source)
    }
}

fn retryable(err: &SdkError, config: &RetryConfig) -> bool {
    match err {
        SdkError::Transport(re) => re.is_connect() || re.is_timeout() || re.is_request(),
        SdkError::Exchange { code: Some(c), .. } => config.retryable_statuses.contains(c),
        _ => false,
    }
}

/// Form/query encoding: `command` first, then `nonce` for signed calls, then
/// the remaining arguments sorted by key.
fn encode_args(command: &str, nonce: Option<u64>, params: &[(&str, String)]) -> String {
    let mut args: Vec<(&str, String)> = vec![("command", command.to_string())];
    if let Some(n) = nonce {
        args.push(("nonce", n.to_string()));
    }
    let mut sorted: Vec<(&str, String)> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    args.extend(sorted);
    serde_urlencoded::to_string(&args).expect("string pairs always form-encode")
}

fn parse_response(
    command: &str,
    http_ok: bool,
    status: u16,
    text: &str,
) -> Result<Value, SdkError> {
    let value: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) if http_ok => return Err(SdkError::Serde(e)),
        Err(_) => {
            return Err(SdkError::Exchange {
                code: Some(status),
                message: text.to_string(),
            })
        }
    };
    decode_envelope(command, (!http_ok).then_some(status), value)
}

/// Decode the exchange's in-band error envelope.
///
/// Errors arrive as `{"error": "..."}` (with HTTP 200 as often as not);
/// some commands instead signal failure with a `success` flag. Error text is
/// passed through verbatim.
fn decode_envelope(command: &str, code: Option<u16>, value: Value) -> Result<Value, SdkError> {
    if let Some(text) = value.get("error").and_then(|e| e.as_str()) {
        if PAIR_ERRORS.contains(&text) {
            return Err(SdkError::NotFound("nonexistent currency pair".to_string()));
        }
        if text == ORDER_NOT_FOUND {
            return Err(SdkError::NotFound(text.to_string()));
        }
        return Err(SdkError::Exchange {
            code,
            message: text.to_string(),
        });
    }

    if let Some(flag) = value.get("success") {
        let ok = flag.as_i64() == Some(1) || flag.as_str() == Some("1") || flag.as_bool() == Some(true);
        if !ok {
            let message = value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("command {command:?} reported success != 1"));
            return Err(SdkError::Exchange { code, message });
        }
    }

    Ok(value)
}
