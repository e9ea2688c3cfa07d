//! Call tracing — an observability sink for every API call.
//!
//! When a sink is configured, it receives each call's command and encoded
//! arguments before dispatch, and the raw result or error afterwards. Purely
//! observational: a sink can never alter what a call returns.

use crate::error::SdkError;

/// Receives every API call when tracing is enabled.
pub trait CallSink: Send + Sync {
    fn on_call(&self, command: &str, args: &str);
    fn on_result(&self, command: &str, outcome: Result<&serde_json::Value, &SdkError>);
}

/// Default sink: emits `tracing` events at debug level.
pub struct LogSink;

impl CallSink for LogSink {
    fn on_call(&self, command: &str, args: &str) {
        tracing::debug!(command, args, "calling exchange API");
    }

    fn on_result(&self, command: &str, outcome: Result<&serde_json::Value, &SdkError>) {
        match outcome {
            Ok(value) => tracing::debug!(command, %value, "exchange API response"),
            Err(err) => tracing::debug!(command, error = %err, "exchange API call failed"),
        }
    }
}
