use crate::core::errors::ExchangeError;
use crate::core::kernel::HttpTransport;
use crate::core::traits::OrderPlacer;
use crate::core::types::{OrderListQuery, OrderRequest};
use crate::exchanges::upbit::rest::UpbitRest;
use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

/// Upbit order placement, cancellation and lookup
pub struct Trading<T> {
    rest: UpbitRest<T>,
}

impl<T: HttpTransport> Trading<T> {
    pub fn new(rest: &UpbitRest<T>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<T: HttpTransport> OrderPlacer for Trading<T> {
    async fn place_order(&self, order: OrderRequest) -> Result<Value, ExchangeError> {
        self.rest.place_order(&order).await
    }

    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn cancel_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.rest.cancel_order(uuid, identifier).await
    }

    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_order_chance(&self, market: &str) -> Result<Value, ExchangeError> {
        self.rest.get_order_chance(market).await
    }

    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.rest.get_order(uuid, identifier).await
    }

    #[instrument(skip(self, query), fields(exchange = "upbit", market = ?query.market))]
    async fn get_orders(&self, query: OrderListQuery) -> Result<Value, ExchangeError> {
        self.rest.get_orders(&query).await
    }
}
