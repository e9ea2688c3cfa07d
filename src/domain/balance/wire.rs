//! Wire types for balance responses.

use crate::shared::{Currency, Quantity};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One `returnCompleteBalances` row, keyed by currency in the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteBalanceResponse {
    pub available: Quantity,
    #[serde(rename = "onOrders")]
    pub on_orders: Quantity,
    #[serde(rename = "btcValue")]
    pub btc_value: Quantity,
}

/// Full `returnCompleteBalances` payload.
pub type CompleteBalancesResponse = BTreeMap<Currency, CompleteBalanceResponse>;

/// `returnAvailableAccountBalances` payload: account → currency → amount.
pub type AvailableBalancesResponse = BTreeMap<String, BTreeMap<Currency, Quantity>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_balances_parse() {
        let balances: CompleteBalancesResponse = serde_json::from_str(
            r#"{
                "BTC": {"available": "5.015", "onOrders": "1.0025", "btcValue": "6.0175"},
                "LTC": {"available": "0.00000000", "onOrders": "0.00000000", "btcValue": "0.00000000"}
            }"#,
        )
        .unwrap();
        let btc = &balances[&"BTC".parse().unwrap()];
        assert_eq!(btc.available, "5.015".parse().unwrap());
        assert_eq!(btc.on_orders, "1.0025".parse().unwrap());
    }

    #[test]
    fn test_available_balances_parse() {
        let balances: AvailableBalancesResponse = serde_json::from_str(
            r#"{
                "exchange": {"BTC": "1.19042859", "STR": "3.71074631"},
                "margin": {"BTC": "7.09955986"}
            }"#,
        )
        .unwrap();
        assert_eq!(
            balances["exchange"][&"STR".parse().unwrap()],
            "3.71074631".parse().unwrap()
        );
    }
}
