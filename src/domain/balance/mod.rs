//! Balance domain — filtered balance views and quote-currency valuation.

pub mod client;
pub mod valuation;
pub mod wire;

pub use valuation::{OnUnpricable, PricingOptions};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which account class funds must sit in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Account {
    #[default]
    All,
    Exchange,
    Margin,
    Lending,
}

impl Account {
    pub fn as_str(&self) -> &'static str {
        match self {
            Account::All => "all",
            Account::Exchange => "exchange",
            Account::Margin => "margin",
            Account::Lending => "lending",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether funds tied up on open orders count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Free funds plus funds on orders.
    #[default]
    All,
    /// Free funds only.
    Available,
    /// Funds on open orders only.
    OnOrders,
}

/// Filter for balance queries.
///
/// Funds count when they are in the requested account class and match the
/// requested availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalanceFilter {
    pub account: Account,
    pub availability: Availability,
}

impl BalanceFilter {
    pub fn account(account: Account) -> Self {
        Self {
            account,
            ..Self::default()
        }
    }

    pub fn available_only() -> Self {
        Self {
            availability: Availability::Available,
            ..Self::default()
        }
    }

    pub fn on_orders_only() -> Self {
        Self {
            availability: Availability::OnOrders,
            ..Self::default()
        }
    }
}
