use crate::core::errors::ExchangeError;
use crate::core::kernel::{HttpMethod, HttpTransport, SignedRest};
use crate::core::types::{MinuteUnit, OrderListQuery, OrderRequest, RequestParams};
use crate::exchanges::upbit::validation::{
    require_uuid_or_identifier, synthesize_identifier, validate_order,
};
use serde_json::Value;
use tracing::{debug, instrument};

/// Upbit REST API endpoints
///
/// Each method maps typed arguments to a `(method, path, params)` triple and
/// hands it to the dispatcher. Order placement is validated before anything is
/// signed or sent.
#[derive(Debug)]
pub struct UpbitRest<T> {
    rest_client: SignedRest<T>,
}

impl<T> Clone for UpbitRest<T> {
    fn clone(&self) -> Self {
        Self {
            rest_client: self.rest_client.clone(),
        }
    }
}

impl<T: HttpTransport> UpbitRest<T> {
    pub fn new(rest_client: SignedRest<T>) -> Self {
        Self { rest_client }
    }

    pub fn rest_client(&self) -> &SignedRest<T> {
        &self.rest_client
    }

    /// Market codes (`market/all`)
    pub async fn get_markets(&self, is_details: bool) -> Result<Value, ExchangeError> {
        let mut params = RequestParams::new();
        params.push("isDetails", is_details);

        self.rest_client
            .dispatch(HttpMethod::Get, "market/all", &params)
            .await
    }

    /// Minute candles (`candles/minutes/{unit}`)
    ///
    /// `to` accepts `yyyy-MM-dd'T'HH:mm:ss'Z'` or `yyyy-MM-dd HH:mm:ss`; omitted
    /// means the most recent candle. `count` is capped at 200 by the exchange.
    pub async fn get_candles_minutes(
        &self,
        unit: MinuteUnit,
        market: &str,
        to: Option<&str>,
        count: Option<u32>,
    ) -> Result<Value, ExchangeError> {
        let endpoint = format!("candles/minutes/{}", unit);
        let mut params = RequestParams::new();
        params
            .push("market", market)
            .push_opt("to", to)
            .push_opt("count", count);

        self.rest_client
            .dispatch(HttpMethod::Get, &endpoint, &params)
            .await
    }

    /// Day candles (`candles/days`)
    pub async fn get_candles_days(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
        converting_price_unit: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let mut params = RequestParams::new();
        params
            .push("market", market)
            .push_opt("count", count)
            .push_opt("to", to)
            .push_opt("convertingPriceUnit", converting_price_unit);

        self.rest_client
            .dispatch(HttpMethod::Get, "candles/days", &params)
            .await
    }

    /// Week candles (`candles/weeks`)
    pub async fn get_candles_weeks(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let params = Self::candle_params(market, count, to);
        self.rest_client
            .dispatch(HttpMethod::Get, "candles/weeks", &params)
            .await
    }

    /// Month candles (`candles/months`)
    pub async fn get_candles_months(
        &self,
        market: &str,
        count: Option<u32>,
        to: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let params = Self::candle_params(market, count, to);
        self.rest_client
            .dispatch(HttpMethod::Get, "candles/months", &params)
            .await
    }

    fn candle_params(market: &str, count: Option<u32>, to: Option<&str>) -> RequestParams {
        let mut params = RequestParams::new();
        params
            .push("market", market)
            .push_opt("count", count)
            .push_opt("to", to);
        params
    }

    // Exchange API endpoints

    /// Balances of every held asset (`accounts`)
    pub async fn get_accounts(&self) -> Result<Value, ExchangeError> {
        self.rest_client
            .dispatch(HttpMethod::Get, "accounts", &RequestParams::new())
            .await
    }

    /// Place an order (`POST orders`)
    ///
    /// Fails with `InvalidParameters` before any signing when the side/type
    /// combination is illegal or a market order lacks its sizing field. A missing
    /// identifier is replaced by a synthesized one.
    #[instrument(skip(self, order), fields(market = %order.market, side = %order.side, ord_type = %order.order_type))]
    pub async fn place_order(&self, order: &OrderRequest) -> Result<Value, ExchangeError> {
        let params = Self::order_params(order)?;
        self.rest_client
            .dispatch(HttpMethod::Post, "orders", &params)
            .await
    }

    /// Validated order placement parameters in wire order
    pub fn order_params(order: &OrderRequest) -> Result<RequestParams, ExchangeError> {
        validate_order(order)?;

        let identifier = match &order.identifier {
            Some(identifier) if !identifier.is_empty() => identifier.clone(),
            _ => {
                let identifier = synthesize_identifier(order, chrono::Utc::now());
                debug!(%identifier, "Synthesized order identifier");
                identifier
            }
        };

        let mut params = RequestParams::new();
        params
            .push("market", &order.market)
            .push("side", order.side)
            .push_opt("volume", order.volume)
            .push_opt("price", order.price)
            .push("ord_type", order.order_type)
            .push("identifier", identifier);
        Ok(params)
    }

    /// Cancel an order (`DELETE order`)
    pub async fn cancel_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let params = Self::lookup_params(uuid, identifier)?;
        self.rest_client
            .dispatch(HttpMethod::Delete, "order", &params)
            .await
    }

    /// Order constraints and fees for a market (`orders/chance`)
    pub async fn get_order_chance(&self, market: &str) -> Result<Value, ExchangeError> {
        let mut params = RequestParams::new();
        params.push("market", market);

        self.rest_client
            .dispatch(HttpMethod::Get, "orders/chance", &params)
            .await
    }

    /// Single order lookup (`GET order`)
    pub async fn get_order(
        &self,
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<Value, ExchangeError> {
        let params = Self::lookup_params(uuid, identifier)?;
        self.rest_client
            .dispatch(HttpMethod::Get, "order", &params)
            .await
    }

    /// Order history (`GET orders`)
    pub async fn get_orders(&self, query: &OrderListQuery) -> Result<Value, ExchangeError> {
        self.rest_client
            .dispatch(HttpMethod::Get, "orders", &query.to_params())
            .await
    }

    fn lookup_params(
        uuid: Option<&str>,
        identifier: Option<&str>,
    ) -> Result<RequestParams, ExchangeError> {
        require_uuid_or_identifier(uuid, identifier)?;

        let mut params = RequestParams::new();
        params.push_opt("uuid", uuid).push_opt("identifier", identifier);
        Ok(params)
    }
}
