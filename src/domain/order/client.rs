//! Orders sub-client — place, cancel, move, query.

use crate::client::PoloniexClient;
use crate::domain::order::wire::{
    MoveOrderResponse, OpenOrderResponse, OrderTradeResponse, PlaceOrderResponse,
};
use crate::domain::order::Order;
use crate::domain::trade::Trade;
use crate::error::SdkError;
use crate::shared::quantity::IntoQuantity;
use crate::shared::{OrderSubtype, Pair, Quantity, Side};

use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Options for order placement.
#[derive(Debug, Clone)]
pub struct PlaceOptions {
    pub subtype: OrderSubtype,
    /// Maximum lending rate accepted when borrowing for a margin order.
    /// Ignored for exchange orders.
    pub lending_rate: Quantity,
}

impl Default for PlaceOptions {
    fn default() -> Self {
        Self {
            subtype: OrderSubtype::Exchange,
            lending_rate: Quantity::from(Decimal::new(2, 2)),
        }
    }
}

impl PlaceOptions {
    pub fn margin() -> Self {
        Self {
            subtype: OrderSubtype::Margin,
            ..Self::default()
        }
    }
}

/// Sub-client for order placement and lifecycle operations.
///
/// All methods here hit the trading API: they require credentials and pass
/// through the client's confirmation policy. Placement and cancellation are
/// never retried; a transport failure after dispatch surfaces as
/// [`SdkError::AmbiguousOutcome`].
pub struct Orders<'a> {
    pub(crate) client: &'a PoloniexClient,
}

impl<'a> Orders<'a> {
    /// Place a limit buy order. `rate` and `amount` accept exact inputs
    /// only: integers, decimal strings, or `Decimal` values.
    pub async fn place_buy(
        &self,
        pair: &Pair,
        rate: impl IntoQuantity,
        amount: impl IntoQuantity,
        opts: &PlaceOptions,
    ) -> Result<Order, SdkError> {
        self.place(Side::Buy, pair, rate.into_quantity()?, amount.into_quantity()?, opts)
            .await
    }

    /// Place a limit sell order. Same input contract as [`place_buy`](Self::place_buy).
    pub async fn place_sell(
        &self,
        pair: &Pair,
        rate: impl IntoQuantity,
        amount: impl IntoQuantity,
        opts: &PlaceOptions,
    ) -> Result<Order, SdkError> {
        self.place(Side::Sell, pair, rate.into_quantity()?, amount.into_quantity()?, opts)
            .await
    }

    async fn place(
        &self,
        side: Side,
        pair: &Pair,
        rate: Quantity,
        amount: Quantity,
        opts: &PlaceOptions,
    ) -> Result<Order, SdkError> {
        if rate.is_sign_negative() {
            return Err(SdkError::Validation("rate must be >= 0".to_string()));
        }
        if amount <= Quantity::ZERO {
            return Err(SdkError::Validation("amount must be > 0".to_string()));
        }

        let command = match (opts.subtype, side) {
            (OrderSubtype::Exchange, Side::Buy) => "buy",
            (OrderSubtype::Exchange, Side::Sell) => "sell",
            (OrderSubtype::Margin, Side::Buy) => "marginBuy",
            (OrderSubtype::Margin, Side::Sell) => "marginSell",
        };
        let mut params = vec![
            ("currencyPair", pair.to_wire()),
            ("rate", rate.to_string()),
            ("amount", amount.to_string()),
        ];
        if opts.subtype == OrderSubtype::Margin {
            params.push(("lendingRate", opts.lending_rate.to_string()));
        }

        let value = self.client.trading(command, &params, true).await?;
        let resp: PlaceOrderResponse = serde_json::from_value(value)?;
        Ok(Order::from_placement(
            resp,
            side,
            opts.subtype,
            pair.clone(),
            rate,
            amount,
        ))
    }

    /// Open orders for one pair. Order within the list is unspecified.
    pub async fn open(&self, pair: &Pair) -> Result<Vec<Order>, SdkError> {
        let params = [("currencyPair", pair.to_wire())];
        let value = self
            .client
            .trading("returnOpenOrders", &params, false)
            .await?;
        let rows: Vec<OpenOrderResponse> = serde_json::from_value(value)?;
        Ok(rows.into_iter().map(|r| r.into_order(pair)).collect())
    }

    /// Open orders for every pair that has at least one.
    pub async fn open_all(&self) -> Result<BTreeMap<Pair, Vec<Order>>, SdkError> {
        let params = [("currencyPair", "all".to_string())];
        let value = self
            .client
            .trading("returnOpenOrders", &params, false)
            .await?;
        let raw: BTreeMap<String, Vec<OpenOrderResponse>> = serde_json::from_value(value)?;
        let mut open = BTreeMap::new();
        for (wire_pair, rows) in raw {
            if rows.is_empty() {
                continue;
            }
            let pair = Pair::from_wire(&wire_pair)?;
            let orders = rows.into_iter().map(|r| r.into_order(&pair)).collect();
            open.insert(pair, orders);
        }
        Ok(open)
    }

    /// Cancel an open order. Fails with [`SdkError::NotFound`] when the
    /// exchange no longer knows the order (already filled or cancelled).
    pub async fn cancel(&self, order_id: u64) -> Result<(), SdkError> {
        let params = [("orderNumber", order_id.to_string())];
        self.client.trading("cancelOrder", &params, true).await?;
        Ok(())
    }

    /// Change an open order's rate and/or amount. The exchange replaces the
    /// order; the returned value is the replacement's order number.
    ///
    /// With neither field given this is a no-op: no call is issued and
    /// `None` is returned. The move command always needs a rate, so when
    /// only `new_amount` is given the current rate is looked up from the
    /// open orders first.
    pub async fn move_order(
        &self,
        order_id: u64,
        new_rate: Option<Quantity>,
        new_amount: Option<Quantity>,
    ) -> Result<Option<u64>, SdkError> {
        let rate = match (new_rate, new_amount) {
            (None, None) => return Ok(None),
            (Some(rate), _) => rate,
            (None, Some(_)) => self.current_rate(order_id).await?,
        };

        let mut params = vec![
            ("orderNumber", order_id.to_string()),
            ("rate", rate.to_string()),
        ];
        if let Some(amount) = new_amount {
            params.push(("amount", amount.to_string()));
        }
        let value = self.client.trading("moveOrder", &params, true).await?;
        let resp: MoveOrderResponse = serde_json::from_value(value)?;
        Ok(Some(resp.order_number))
    }

    /// The fills that executed (or partially executed) an order.
    ///
    /// An order the exchange no longer knows yields an empty list.
    pub async fn trades_of(&self, order_id: u64) -> Result<Vec<Trade>, SdkError> {
        let params = [("orderNumber", order_id.to_string())];
        let value = match self
            .client
            .trading("returnOrderTrades", &params, false)
            .await
        {
            Ok(value) => value,
            Err(SdkError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        let rows: Vec<OrderTradeResponse> = serde_json::from_value(value)?;
        rows.into_iter().map(|r| r.into_trade(order_id)).collect()
    }

    async fn current_rate(&self, order_id: u64) -> Result<Quantity, SdkError> {
        for orders in self.open_all().await?.into_values() {
            if let Some(order) = orders.iter().find(|o| o.id == order_id) {
                return Ok(order.rate);
            }
        }
        Err(SdkError::NotFound(format!(
            "no open order with number {order_id}"
        )))
    }
}
