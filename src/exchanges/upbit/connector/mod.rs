use crate::core::errors::ExchangeError;
use crate::core::kernel::{HttpTransport, SignedRest};
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::core::types::{MinuteUnit, OrderListQuery, OrderRequest};
use crate::exchanges::upbit::rest::UpbitRest;
use async_trait::async_trait;
use serde_json::Value;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Upbit connector that composes all sub-trait implementations
///
/// All parts share one dispatcher (and thus one transport and signer); none of
/// them hold mutable state, so a connector can serve concurrent calls.
pub struct UpbitConnector<T> {
    pub market: MarketData<T>,
    pub trading: Trading<T>,
    pub account: Account<T>,
}

impl<T: HttpTransport> UpbitConnector<T> {
    pub fn new(rest: SignedRest<T>) -> Self {
        let rest = UpbitRest::new(rest);
        Self {
            market: MarketData::new(&rest),
            trading: Trading::new(&rest),
            account: Account::new(&rest),
        }
    }
}

#[async_trait]
impl<T: HttpTransport> AccountInfo for UpbitConnector<T> {
    async fn get_accounts(&self) -> Result<Value, ExchangeError> {
        self.account.get_accounts().await
    }
}

#[async_trait]
impl<T: HttpTransport> MarketDataSource for UpbitConnector<T> {
    async fn get_markets(&self, is_details: bool) -> Result<Value, ExchangeError> {
        self.market.get_markets(is_details).await
    }

    async fn get_candles_minutes(
        &self,
        unit: MinuteUnit,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        self.market
            .get_candles_minutes(unit, market, to, count)
            .await
    }

    async fn get_candles_days(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
        converting_price_unit: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.market
            .get_candles_days(market, count, to, converting_price_unit)
            .await
    }

    async fn get_candles_weeks(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.market.get_candles_weeks(market, count, to).await
    }

    async fn get_candles_months(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.market.get_candles_months(market, count, to).await
    }
}

#[async_trait]
impl<T: HttpTransport> OrderPlacer for UpbitConnector<T> {
    async fn place_order(&self, order: OrderRequest) -> Result<Value, ExchangeError> {
        self.trading.place_order(order).await
    }

    async fn cancel_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.trading.cancel_order(uuid, identifier).await
    }

    async fn get_order_chance(&self, market: &str) -> Result<Value, ExchangeError> {
        self.trading.get_order_chance(market).await
    }

    async fn get_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        self.trading.get_order(uuid, identifier).await
    }

    async fn get_orders(&self, query: OrderListQuery) -> Result<Value, ExchangeError> {
        self.trading.get_orders(query).await
    }
}

impl<T: HttpTransport> ExchangeConnector for UpbitConnector<T> {}
