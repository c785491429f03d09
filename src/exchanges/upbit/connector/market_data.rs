use crate::core::errors::ExchangeError;
use crate::core::kernel::HttpTransport;
use crate::core::traits::MarketDataSource;
use crate::core::types::MinuteUnit;
use crate::exchanges::upbit::rest::UpbitRest;
use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

/// Upbit market data: market listing and candles
pub struct MarketData<T> {
    rest: UpbitRest<T>,
}

impl<T: HttpTransport> MarketData<T> {
    pub fn new(rest: &UpbitRest<T>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<T: HttpTransport> MarketDataSource for MarketData<T> {
    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_markets(&self, is_details: bool) -> Result<Value, ExchangeError> {
        self.rest.get_markets(is_details).await
    }

    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_candles_minutes(
        &self,
        unit: MinuteUnit,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        self.rest.get_candles_minutes(unit, market, to, count).await
    }

    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_candles_days(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
        converting_price_unit: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.rest
            .get_candles_days(market, count, to, converting_price_unit)
            .await
    }

    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_candles_weeks(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.rest.get_candles_weeks(market, count, to).await
    }

    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_candles_months(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.rest.get_candles_months(market, count, to).await
    }
}
