//! Shared newtypes and enums used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize as
//! the plain strings the exchange sends, so they can be used directly in wire
//! types without conversion overhead.

pub mod quantity;
pub mod serde_util;

pub use quantity::{Quantity, QuantityError};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("malformed currency symbol {0:?}; expected uppercase letters and digits")]
    Currency(String),

    #[error("malformed pair {0:?}; expected \"BASE/QUOTE\"")]
    Pair(String),

    #[error("pair base and quote must differ, got {0:?}")]
    DegeneratePair(String),
}

// ─── Currency ────────────────────────────────────────────────────────────────

/// A currency symbol as the exchange spells it (e.g. `"BTC"`, `"ETH"`).
///
/// Uppercase ASCII letters and digits, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Currency(String);

impl Currency {
    pub fn new(s: impl Into<String>) -> Result<Self, SymbolError> {
        let s = s.into();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()) {
            return Err(SymbolError::Currency(s));
        }
        Ok(Currency(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Currency::new(s).map_err(serde::de::Error::custom)
    }
}

// ─── Pair ────────────────────────────────────────────────────────────────────

/// An ordered base/quote currency pairing, canonically written `"BASE/QUOTE"`.
///
/// Buying the pair buys the base currency with the quote currency. The
/// exchange's own wire encoding reverses the order and joins with an
/// underscore (`"ETH/BTC"` travels as `"BTC_ETH"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair {
    base: Currency,
    quote: Currency,
}

impl Pair {
    pub fn new(base: Currency, quote: Currency) -> Result<Self, SymbolError> {
        if base == quote {
            return Err(SymbolError::DegeneratePair(format!("{}/{}", base, quote)));
        }
        Ok(Pair { base, quote })
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    pub fn quote(&self) -> &Currency {
        &self.quote
    }

    /// The exchange's `"QUOTE_BASE"` encoding.
    pub(crate) fn to_wire(&self) -> String {
        format!("{}_{}", self.quote, self.base)
    }

    /// Decode the exchange's `"QUOTE_BASE"` encoding.
    pub(crate) fn from_wire(s: &str) -> Result<Self, SymbolError> {
        let (quote, base) = s
            .split_once('_')
            .ok_or_else(|| SymbolError::Pair(s.to_string()))?;
        Pair::new(base.parse()?, quote.parse()?)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for Pair {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| SymbolError::Pair(s.to_string()))?;
        Pair::new(base.parse()?, quote.parse()?)
    }
}

impl Serialize for Pair {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pair {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Order/trade side: buying or selling the pair's base currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── OrderSubtype ────────────────────────────────────────────────────────────

/// Whether an order trades the member's own funds or borrowed (margin) funds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSubtype {
    #[default]
    Exchange,
    #[serde(alias = "marginTrade")]
    Margin,
}

impl OrderSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSubtype::Exchange => "exchange",
            OrderSubtype::Margin => "margin",
        }
    }
}

impl fmt::Display for OrderSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_validation() {
        assert!(Currency::new("BTC").is_ok());
        assert!(Currency::new("1CR").is_ok());
        assert!(Currency::new("").is_err());
        assert!(Currency::new("btc").is_err());
        assert!(Currency::new("BT-C").is_err());
    }

    #[test]
    fn test_pair_parse_and_display() {
        let pair: Pair = "ETH/BTC".parse().unwrap();
        assert_eq!(pair.base().as_str(), "ETH");
        assert_eq!(pair.quote().as_str(), "BTC");
        assert_eq!(pair.to_string(), "ETH/BTC");
    }

    #[test]
    fn test_pair_rejects_degenerate_and_malformed() {
        assert!("BTC/BTC".parse::<Pair>().is_err());
        assert!("ETHBTC".parse::<Pair>().is_err());
        assert!("eth/btc".parse::<Pair>().is_err());
    }

    #[test]
    fn test_pair_wire_encoding_swaps_order() {
        let pair: Pair = "ETH/BTC".parse().unwrap();
        assert_eq!(pair.to_wire(), "BTC_ETH");
        assert_eq!(Pair::from_wire("BTC_ETH").unwrap(), pair);
    }

    #[test]
    fn test_pair_serde_uses_canonical_text() {
        let pair: Pair = "XMR/USDT".parse().unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"XMR/USDT\"");
        let back: Pair = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, back);
    }

    #[test]
    fn test_side_serde() {
        let side: Side = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(side, Side::Buy);
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"sell\"");
    }

    #[test]
    fn test_subtype_accepts_margin_trade_alias() {
        let st: OrderSubtype = serde_json::from_str("\"marginTrade\"").unwrap();
        assert_eq!(st, OrderSubtype::Margin);
        let st: OrderSubtype = serde_json::from_str("\"exchange\"").unwrap();
        assert_eq!(st, OrderSubtype::Exchange);
    }
}
