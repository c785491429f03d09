use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{HttpTransport, ReqwestTransport, RestClientBuilder, RestClientConfig};
use crate::exchanges::upbit::{connector::UpbitConnector, signer::UpbitSigner};
use std::sync::Arc;

/// Builder for creating Upbit connectors
///
/// Every Upbit call is authenticated, so building without credentials fails
/// with a configuration error instead of producing a client that can only
/// ever be rejected.
pub struct UpbitBuilder {
    config: ExchangeConfig,
    rest_timeout: u64,
    user_agent: Option<String>,
}

impl UpbitBuilder {
    pub fn new() -> Self {
        Self {
            config: ExchangeConfig::new(String::new(), String::new()),
            rest_timeout: 30,
            user_agent: None,
        }
    }

    /// Set the exchange configuration
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set API credentials, keeping any base URL already configured
    pub fn with_credentials(mut self, access_key: String, secret_key: String) -> Self {
        let base_url = self.config.base_url.take();
        self.config = ExchangeConfig::new(access_key, secret_key);
        self.config.base_url = base_url;
        self
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.config.base_url = Some(base_url);
        self
    }

    /// Per-request deadline in seconds, enforced by the transport
    pub fn with_rest_timeout(mut self, timeout: u64) -> Self {
        self.rest_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    fn rest_builder(&self) -> Result<RestClientBuilder, ExchangeError> {
        if !self.config.has_credentials() {
            return Err(ExchangeError::ConfigurationError(
                "Upbit access key and secret key are required".to_string(),
            ));
        }

        let signer = Arc::new(UpbitSigner::new(
            self.config.access_key().to_string(),
            self.config.secret_key().to_string(),
        )?);

        let mut rest_config =
            RestClientConfig::new(self.config.resolved_base_url(), "upbit".to_string())
                .with_timeout(self.rest_timeout);
        if let Some(user_agent) = &self.user_agent {
            rest_config = rest_config.with_user_agent(user_agent.clone());
        }

        Ok(RestClientBuilder::new(rest_config).with_signer(signer))
    }

    /// Build a connector on the default reqwest transport
    pub fn build(self) -> Result<UpbitConnector<ReqwestTransport>, ExchangeError> {
        let rest = self.rest_builder()?.build()?;
        Ok(UpbitConnector::new(rest))
    }

    /// Build a connector on a caller-supplied transport
    pub fn build_with_transport<T: HttpTransport>(
        self,
        transport: T,
    ) -> Result<UpbitConnector<T>, ExchangeError> {
        let rest = self.rest_builder()?.build_with_transport(transport)?;
        Ok(UpbitConnector::new(rest))
    }
}

impl Default for UpbitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an Upbit connector from configuration
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<UpbitConnector<ReqwestTransport>, ExchangeError> {
    UpbitBuilder::new().with_config(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_credentials_fails() {
        let config = ExchangeConfig::new(String::new(), String::new());
        let result = build_connector(config);
        assert!(result.err().unwrap().is_configuration_error());
    }

    #[test]
    fn test_build_with_credentials() {
        let config = ExchangeConfig::new("test_access".to_string(), "test_secret".to_string());
        assert!(build_connector(config).is_ok());
    }

    #[test]
    fn test_builder_keeps_base_url_when_setting_credentials() {
        let builder = UpbitBuilder::new()
            .with_base_url("http://localhost:9000/v1".to_string())
            .with_credentials("test_access".to_string(), "test_secret".to_string())
            .with_rest_timeout(5)
            .with_user_agent("upbitx-test".to_string());

        assert_eq!(
            builder.config.resolved_base_url(),
            "http://localhost:9000/v1/"
        );
        assert!(builder.build().is_ok());
    }
}
