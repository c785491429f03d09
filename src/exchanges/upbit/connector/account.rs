use crate::core::errors::ExchangeError;
use crate::core::kernel::HttpTransport;
use crate::core::traits::AccountInfo;
use crate::exchanges::upbit::rest::UpbitRest;
use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

/// Upbit account implementation
pub struct Account<T> {
    rest: UpbitRest<T>,
}

impl<T: HttpTransport> Account<T> {
    pub fn new(rest: &UpbitRest<T>) -> Self {
        Self { rest: rest.clone() }
    }
}

#[async_trait]
impl<T: HttpTransport> AccountInfo for Account<T> {
    #[instrument(skip(self), fields(exchange = "upbit"))]
    async fn get_accounts(&self) -> Result<Value, ExchangeError> {
        self.rest.get_accounts().await
    }
}
