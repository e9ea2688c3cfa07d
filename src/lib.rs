//! # Poloniex SDK
//!
//! A typed Rust client for the Poloniex public and trading REST APIs:
//! orders, trades, and balances as domain types instead of raw JSON, with
//! exact decimal arithmetic throughout.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Shared** — exact [`Quantity`](shared::Quantity) amounts,
//!    [`Pair`](shared::Pair)/[`Currency`](shared::Currency) symbols
//! 2. **Domain** — vertical slices (market, trade, order, balance): domain
//!    types, wire types, conversions, sub-clients
//! 3. **Transport** — `PoloniexHttp` with request signing, pacing, and
//!    error-envelope decoding
//! 4. **Collaborators** — pluggable confirmation policy + call-trace sink
//! 5. **High-Level Client** — `PoloniexClient` with nested sub-clients and
//!    process-lifetime metadata caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use poloniex_sdk::prelude::*;
//!
//! let client = PoloniexClient::builder()
//!     .credentials("API-KEY", "api-secret")
//!     .build()?;
//!
//! let pair: Pair = "ETH/BTC".parse()?;
//! let ticker = client.markets().ticker(&pair).await?;
//! let order = client
//!     .orders()
//!     .place_buy(&pair, "0.05", "100.0", &PlaceOptions::default())
//!     .await?;
//! ```

// ── Layer 1: Shared ──────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): types, wire types, conversions, sub-clients.
pub mod domain;

// ── Layer 3: Transport ───────────────────────────────────────────────────────

/// Request signing and nonce generation.
pub mod auth;

/// HTTP client with pacing and envelope decoding.
pub mod http;

// ── Layer 4: Collaborators ───────────────────────────────────────────────────

/// Confirmation policy consulted before trading-API calls.
pub mod confirm;

/// Call-trace sink for observability.
pub mod trace;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `PoloniexClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::quantity::IntoQuantity;
    pub use crate::shared::{Currency, OrderSubtype, Pair, Quantity, QuantityError, Side};

    // Domain types — market
    pub use crate::domain::market::{BookEntry, OrderBook, PairInfo, Ticker};

    // Domain types — order
    pub use crate::domain::order::{Order, OrderStatus, PlaceOptions};

    // Domain types — trade
    pub use crate::domain::trade::Trade;

    // Domain types — balance
    pub use crate::domain::balance::{
        Account, Availability, BalanceFilter, OnUnpricable, PricingOptions,
    };

    // Errors
    pub use crate::error::SdkError;

    // Network
    pub use crate::network::{DEFAULT_PUBLIC_URL, DEFAULT_TRADING_URL};

    // Collaborators
    pub use crate::auth::Credentials;
    pub use crate::confirm::{ConfirmPolicy, ConsoleConfirm, NoConfirm};
    pub use crate::trace::{CallSink, LogSink};

    // Client + sub-clients
    pub use crate::client::{PoloniexClient, PoloniexClientBuilder};
    pub use crate::domain::balance::client::Balances;
    pub use crate::domain::market::client::Markets;
    pub use crate::domain::order::client::Orders;
    pub use crate::domain::trade::client::Trades;
    pub use crate::http::{RetryConfig, RetryPolicy};
}
