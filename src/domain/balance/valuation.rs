//! Quote-currency valuation over a single ticker snapshot.
//!
//! Every balance priced in one valuation call uses the same ticker snapshot,
//! so the result is internally consistent. Pricing is direct-pair only
//! unless the caller explicitly opts into triangulation.

use crate::domain::market::Ticker;
use crate::error::SdkError;
use crate::shared::{Currency, Pair, Quantity};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// What to do with a held currency no market can price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnUnpricable {
    /// Abort the whole valuation call. The default: a dropped currency
    /// silently understates the total.
    #[default]
    Fail,
    /// Omit the currency from the result.
    Skip,
}

/// Pricing behavior for valuation calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingOptions {
    pub on_unpricable: OnUnpricable,
    /// Walk through intermediate currencies when no direct pair exists.
    /// Off by default.
    pub triangulate: bool,
}

/// Last-trade rates from one ticker snapshot.
pub(crate) struct PriceBook {
    last: BTreeMap<Pair, Quantity>,
}

impl PriceBook {
    pub(crate) fn new(ticker: &BTreeMap<Pair, Ticker>) -> Self {
        Self {
            last: ticker.iter().map(|(p, t)| (p.clone(), t.last)).collect(),
        }
    }

    /// Value `amount` of `currency` in `quote`. `Ok(None)` means unpricable
    /// and skipped per `options`.
    pub(crate) fn value(
        &self,
        amount: Quantity,
        currency: &Currency,
        quote: &Currency,
        options: &PricingOptions,
    ) -> Result<Option<Quantity>, SdkError> {
        match self.try_value(amount, currency, quote, options) {
            Some(v) => Ok(Some(v)),
            None => match options.on_unpricable {
                OnUnpricable::Fail => Err(SdkError::UnpricableAsset {
                    currency: currency.clone(),
                    quote: quote.clone(),
                }),
                OnUnpricable::Skip => Ok(None),
            },
        }
    }

    fn try_value(
        &self,
        amount: Quantity,
        currency: &Currency,
        quote: &Currency,
        options: &PricingOptions,
    ) -> Option<Quantity> {
        if currency == quote {
            return Some(amount);
        }
        if let Some(v) = self.hop(amount, currency, quote) {
            return Some(v);
        }
        if options.triangulate {
            return self.via_path(amount, currency, quote);
        }
        None
    }

    /// One conversion step: sell `from` on a `from/to` market, or buy into
    /// it on a `to/from` market.
    fn hop(&self, amount: Quantity, from: &Currency, to: &Currency) -> Option<Quantity> {
        if let Ok(pair) = Pair::new(from.clone(), to.clone()) {
            if let Some(last) = self.last.get(&pair) {
                return Some(amount * *last);
            }
        }
        if let Ok(pair) = Pair::new(to.clone(), from.clone()) {
            if let Some(last) = self.last.get(&pair) {
                if last.is_zero() {
                    return None;
                }
                return Some(amount / *last);
            }
        }
        None
    }

    /// Fewest-hops path over the pair graph, converting along each edge.
    fn via_path(&self, amount: Quantity, from: &Currency, to: &Currency) -> Option<Quantity> {
        let mut adjacency: HashMap<&Currency, Vec<&Currency>> = HashMap::new();
        for pair in self.last.keys() {
            adjacency.entry(pair.base()).or_default().push(pair.quote());
            adjacency.entry(pair.quote()).or_default().push(pair.base());
        }

        let mut parents: HashMap<&Currency, &Currency> = HashMap::new();
        let mut queue = VecDeque::from([from]);
        parents.insert(from, from);
        while let Some(node) = queue.pop_front() {
            if node == to {
                break;
            }
            for &next in adjacency.get(node).into_iter().flatten() {
                if !parents.contains_key(next) {
                    parents.insert(next, node);
                    queue.push_back(next);
                }
            }
        }
        if !parents.contains_key(to) {
            return None;
        }

        let mut path = vec![to];
        let mut node = to;
        while node != from {
            node = parents[node];
            path.push(node);
        }
        path.reverse();

        let mut value = amount;
        for leg in path.windows(2) {
            value = self.hop(value, leg[0], leg[1])?;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Quantity {
        s.parse().unwrap()
    }

    fn c(s: &str) -> Currency {
        s.parse().unwrap()
    }

    fn book(markets: &[(&str, &str)]) -> PriceBook {
        let ticker = markets
            .iter()
            .map(|(pair, last)| {
                let t = Ticker {
                    highest_bid: q("0"),
                    lowest_ask: q("0"),
                    last: q(last),
                    base_volume: q("0"),
                    quote_volume: q("0"),
                    percent_change: q("0"),
                };
                (pair.parse().unwrap(), t)
            })
            .collect();
        PriceBook::new(&ticker)
    }

    #[test]
    fn test_quote_currency_values_one_to_one() {
        let book = book(&[]);
        let v = book
            .value(q("3.5"), &c("BTC"), &c("BTC"), &PricingOptions::default())
            .unwrap();
        assert_eq!(v, Some(q("3.5")));
    }

    #[test]
    fn test_direct_pair_multiplies_by_last() {
        let book = book(&[("XMR/BTC", "0.02")]);
        let v = book
            .value(q("10"), &c("XMR"), &c("BTC"), &PricingOptions::default())
            .unwrap();
        assert_eq!(v, Some(q("0.2")));
    }

    #[test]
    fn test_inverse_pair_divides_by_last() {
        let book = book(&[("XMR/BTC", "0.02")]);
        let v = book
            .value(q("0.2"), &c("BTC"), &c("XMR"), &PricingOptions::default())
            .unwrap();
        assert_eq!(v, Some(q("10")));
    }

    #[test]
    fn test_unpricable_fails_by_default() {
        let book = book(&[("XMR/BTC", "0.02")]);
        let err = book
            .value(q("1"), &c("DOGE"), &c("BTC"), &PricingOptions::default())
            .unwrap_err();
        assert!(matches!(err, SdkError::UnpricableAsset { .. }));
    }

    #[test]
    fn test_unpricable_skips_when_opted_in() {
        let book = book(&[("XMR/BTC", "0.02")]);
        let options = PricingOptions {
            on_unpricable: OnUnpricable::Skip,
            ..Default::default()
        };
        let v = book.value(q("1"), &c("DOGE"), &c("BTC"), &options).unwrap();
        assert_eq!(v, None);
    }

    #[test]
    fn test_triangulation_requires_opt_in() {
        let book = book(&[("XMR/BTC", "0.02"), ("DCR/BTC", "0.01")]);
        // A DCR→BTC→XMR path exists, but without the opt-in it must not be
        // taken.
        let err = book
            .value(q("5"), &c("DCR"), &c("XMR"), &PricingOptions::default())
            .unwrap_err();
        assert!(matches!(err, SdkError::UnpricableAsset { .. }));
    }

    #[test]
    fn test_triangulation_walks_shortest_path() {
        let book = book(&[("XMR/BTC", "0.02"), ("DCR/BTC", "0.01")]);
        let options = PricingOptions {
            triangulate: true,
            ..Default::default()
        };
        // 5 DCR → 0.05 BTC → 2.5 XMR, all exact.
        let v = book.value(q("5"), &c("DCR"), &c("XMR"), &options).unwrap();
        assert_eq!(v, Some(q("2.5")));
    }

    #[test]
    fn test_zero_rate_inverse_is_unpricable() {
        let book = book(&[("XMR/BTC", "0")]);
        let err = book
            .value(q("1"), &c("BTC"), &c("XMR"), &PricingOptions::default())
            .unwrap_err();
        assert!(matches!(err, SdkError::UnpricableAsset { .. }));
    }
}
