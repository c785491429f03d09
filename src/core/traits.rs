use crate::core::{
    errors::ExchangeError,
    types::{MinuteUnit, OrderListQuery, OrderRequest},
};
use async_trait::async_trait;
use serde_json::Value;

// Responses are returned as decoded JSON without imposing a schema.

#[async_trait]
pub trait MarketDataSource {
    /// List all tradable markets
    async fn get_markets(&self, is_details: bool) -> Result<Value, ExchangeError>;

    async fn get_candles_minutes(
        &self,
        unit: MinuteUnit,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> Result<Value, ExchangeError>;

    async fn get_candles_days(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
        converting_price_unit: Option<&str>,
    ) -> Result<Value, ExchangeError>;

    async fn get_candles_weeks(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError>;

    async fn get_candles_months(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Validate and place a new order
    async fn place_order(&self, order: OrderRequest) -> Result<Value, ExchangeError>;

    /// Cancel by exchange uuid or client identifier; at least one is required
    async fn cancel_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError>;

    async fn get_order_chance(&self, market: &str) -> Result<Value, ExchangeError>;

    /// Look up one order by uuid or client identifier; at least one is required
    async fn get_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError>;

    async fn get_orders(&self, query: OrderListQuery) -> Result<Value, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    async fn get_accounts(&self) -> Result<Value, ExchangeError>;
}

// Composite trait for callers that need everything
#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
