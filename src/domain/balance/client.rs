//! Balances sub-client — filtered balance views and valuations.

use crate::client::PoloniexClient;
use crate::domain::balance::valuation::{PriceBook, PricingOptions};
use crate::domain::balance::wire::{AvailableBalancesResponse, CompleteBalancesResponse};
use crate::domain::balance::{Account, Availability, BalanceFilter};
use crate::error::SdkError;
use crate::shared::{Currency, Quantity};

use std::collections::BTreeMap;

/// Sub-client for account balances.
///
/// Balance views are derived per call from the trading API — nothing is
/// cached. These are private reads: they require credentials and pass the
/// confirmation policy, but never retry and never mutate anything.
pub struct Balances<'a> {
    pub(crate) client: &'a PoloniexClient,
}

impl<'a> Balances<'a> {
    /// Every currency with a nonzero balance under `filter`.
    ///
    /// The exchange has no endpoint for margin/lending totals or their
    /// on-order split, so those combinations fail with
    /// [`SdkError::Unsupported`].
    pub async fn all(
        &self,
        filter: &BalanceFilter,
    ) -> Result<BTreeMap<Currency, Quantity>, SdkError> {
        match (filter.availability, filter.account) {
            (Availability::All | Availability::OnOrders, Account::All | Account::Exchange) => {
                let complete = self.complete_balances(filter.account).await?;
                Ok(from_complete(complete, filter.availability))
            }
            (Availability::All | Availability::OnOrders, account) => {
                Err(SdkError::Unsupported(format!(
                    "the exchange exposes no total or on-order view of the {account} account"
                )))
            }
            (Availability::Available, account) => {
                let per_account = self.available_balances(account).await?;
                Ok(from_available(per_account, account))
            }
        }
    }

    /// Balance of one currency under `filter`.
    ///
    /// A currency the exchange does not list at all fails with
    /// [`SdkError::NotFound`]; a listed currency absent from the balance
    /// payload is simply empty and returns zero.
    pub async fn get(
        &self,
        currency: &Currency,
        filter: &BalanceFilter,
    ) -> Result<Quantity, SdkError> {
        let balances = self.all(filter).await?;
        if let Some(amount) = balances.get(currency) {
            return Ok(*amount);
        }
        let known = self.client.markets().currencies().await?;
        if known.contains(currency) {
            Ok(Quantity::ZERO)
        } else {
            Err(SdkError::NotFound(format!(
                "nonexistent currency {currency}"
            )))
        }
    }

    /// Like [`all`](Self::all), but each balance converted into `quote`
    /// using one ticker snapshot taken at call time.
    pub async fn valuation(
        &self,
        quote: &Currency,
        filter: &BalanceFilter,
        pricing: &PricingOptions,
    ) -> Result<BTreeMap<Currency, Quantity>, SdkError> {
        let balances = self.all(filter).await?;
        let ticker = self.client.markets().ticker_all().await?;
        let book = PriceBook::new(&ticker);

        let mut valuations = BTreeMap::new();
        for (currency, amount) in balances {
            if let Some(value) = book.value(amount, &currency, quote, pricing)? {
                valuations.insert(currency, value);
            }
        }
        Ok(valuations)
    }

    /// Value of one currency's balance in `quote`.
    pub async fn valuation_of(
        &self,
        currency: &Currency,
        quote: &Currency,
        filter: &BalanceFilter,
        pricing: &PricingOptions,
    ) -> Result<Quantity, SdkError> {
        let amount = self.get(currency, filter).await?;
        let ticker = self.client.markets().ticker_all().await?;
        let book = PriceBook::new(&ticker);
        Ok(book
            .value(amount, currency, quote, pricing)?
            .unwrap_or(Quantity::ZERO))
    }

    async fn complete_balances(
        &self,
        account: Account,
    ) -> Result<CompleteBalancesResponse, SdkError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if account == Account::All {
            params.push(("account", "all".to_string()));
        }
        let value = self
            .client
            .trading("returnCompleteBalances", &params, false)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn available_balances(
        &self,
        account: Account,
    ) -> Result<AvailableBalancesResponse, SdkError> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if account != Account::All {
            params.push(("account", account.as_str().to_string()));
        }
        let value = self
            .client
            .trading("returnAvailableAccountBalances", &params, false)
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Balance view from a `returnCompleteBalances` payload. Currencies with a
/// zero result are dropped: a currency never held does not appear.
fn from_complete(
    complete: CompleteBalancesResponse,
    availability: Availability,
) -> BTreeMap<Currency, Quantity> {
    let mut balances: BTreeMap<Currency, Quantity> = complete
        .into_iter()
        .map(|(currency, b)| {
            let amount = match availability {
                Availability::OnOrders => b.on_orders,
                _ => b.available + b.on_orders,
            };
            (currency, amount)
        })
        .collect();
    balances.retain(|_, amount| !amount.is_zero());
    balances
}

/// Balance view from a `returnAvailableAccountBalances` payload: one account
/// class, or all of them summed.
fn from_available(
    per_account: AvailableBalancesResponse,
    account: Account,
) -> BTreeMap<Currency, Quantity> {
    let mut balances: BTreeMap<Currency, Quantity> = BTreeMap::new();
    match account {
        Account::All => {
            for amounts in per_account.into_values() {
                for (currency, amount) in amounts {
                    *balances.entry(currency).or_default() += amount;
                }
            }
        }
        _ => {
            if let Some(amounts) = per_account.get(account.as_str()) {
                balances.extend(amounts.iter().map(|(c, q)| (c.clone(), *q)));
            }
        }
    }
    balances.retain(|_, amount| !amount.is_zero());
    balances
}
