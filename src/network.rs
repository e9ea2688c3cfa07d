//! Network URL constants for the Poloniex SDK.

/// Default public (unsigned) API base URL.
pub const DEFAULT_PUBLIC_URL: &str = "https://poloniex.com/public";

/// Default trading (signed) API base URL.
pub const DEFAULT_TRADING_URL: &str = "https://poloniex.com/tradingApi";
