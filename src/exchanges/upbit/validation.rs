use crate::core::errors::ExchangeError;
use crate::core::types::{OrderRequest, OrderSide, OrderType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Reject orders the exchange would refuse on economic grounds
///
/// | side | type   | rule                          |
/// |------|--------|-------------------------------|
/// | bid  | limit  | ok                            |
/// | bid  | price  | `price` required and > 0      |
/// | bid  | market | rejected (sell-only type)     |
/// | ask  | limit  | ok                            |
/// | ask  | market | `volume` required and > 0     |
/// | ask  | price  | rejected (buy-only type)      |
pub fn validate_order(order: &OrderRequest) -> Result<(), ExchangeError> {
    match (order.side, order.order_type) {
        (OrderSide::Bid, OrderType::Market) => Err(ExchangeError::InvalidParameters(
            "ord_type 'market' is a market sell and cannot be used on a bid order".to_string(),
        )),
        (OrderSide::Ask, OrderType::Price) => Err(ExchangeError::InvalidParameters(
            "ord_type 'price' is a market buy and cannot be used on an ask order".to_string(),
        )),
        (OrderSide::Bid, OrderType::Price) => require_positive("price", order.price),
        (OrderSide::Ask, OrderType::Market) => require_positive("volume", order.volume),
        (_, OrderType::Limit) => Ok(()),
    }
}

fn require_positive(field: &str, value: Option<Decimal>) -> Result<(), ExchangeError> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(()),
        _ => Err(ExchangeError::InvalidParameters(format!(
            "'{}' must be present and greater than zero for a market order",
            field
        ))),
    }
}

/// Traceable client identifier for orders placed without one
///
/// Built from market, side, order type and a microsecond UTC timestamp. It is
/// meant for log correlation only and is not a deduplication key.
pub fn synthesize_identifier(order: &OrderRequest, now: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}_{}",
        order.market,
        order.side,
        order.order_type,
        now.format("%Y%m%d%H%M%S%6f")
    )
}

/// Order lookup and cancellation need at least one key
pub fn require_uuid_or_identifier(
    uuid: Option<&str>,
    identifier: Option<&str>,
) -> Result<(), ExchangeError> {
    let present = |v: Option<&str>| v.is_some_and(|s| !s.is_empty());
    if present(uuid) || present(identifier) {
        Ok(())
    } else {
        Err(ExchangeError::InvalidParameters(
            "Either uuid or identifier is required".to_string(),
        ))
    }
}
