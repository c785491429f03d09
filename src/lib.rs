pub mod core;
pub mod exchanges;

pub use crate::core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer},
    types::*,
};
pub use exchanges::upbit::{UpbitBuilder, UpbitConnector};
