//! Unified SDK error types.

use crate::shared::{Currency, QuantityError, SymbolError};
use thiserror::Error;

/// Top-level SDK error.
///
/// Exchange-reported error text is carried verbatim so callers can match it
/// against the exchange's own documentation.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The request never produced a usable response (connection refused,
    /// DNS failure, timeout on a read call, malformed body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A well-formed error reported by the exchange. `code` is the HTTP
    /// status for non-2xx responses; in-band error envelopes arrive with
    /// status 200 and carry no code.
    #[error("exchange error: {message}")]
    Exchange { code: Option<u16>, message: String },

    /// A trading-API call was attempted on a client built without credentials.
    #[error("credentials required for trading API calls")]
    AuthenticationRequired,

    /// A mutating trading call failed in transport after the request may
    /// already have been dispatched. The order may or may not exist on the
    /// exchange; the caller must reconcile before retrying.
    #[error("outcome of {command:?} is unknown: transport failed after dispatch: {source}")]
    AmbiguousOutcome {
        command: String,
        #[source]
        source: reqwest::Error,
    },

    /// The configured confirmation policy declined the call. No request was
    /// sent.
    #[error("trading call cancelled: confirmation declined")]
    ConfirmationDeclined,

    /// No market exists to price `currency` against `quote`.
    #[error("no market prices {currency} against {quote}")]
    UnpricableAsset { currency: Currency, quote: Currency },

    #[error("not found: {0}")]
    NotFound(String),

    /// The exchange exposes no endpoint for the requested combination.
    #[error("not supported: {0}")]
    Unsupported(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("malformed response: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<SymbolError> for SdkError {
    fn from(e: SymbolError) -> Self {
        SdkError::Validation(e.to_string())
    }
}

impl From<QuantityError> for SdkError {
    fn from(e: QuantityError) -> Self {
        SdkError::Validation(e.to_string())
    }
}
