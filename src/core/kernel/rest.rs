use crate::core::errors::ExchangeError;
use crate::core::kernel::codec::canonicalize;
use crate::core::kernel::signer::Signer;
use crate::core::kernel::transport::{HttpMethod, HttpRequest, HttpTransport, ReqwestTransport};
use crate::core::types::RequestParams;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API, joined with relative endpoint paths
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Per-request deadline applied by the transport
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            user_agent: "upbitx/0.1".to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for the signed REST client
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer used for every request
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build on top of a reqwest transport configured from `RestClientConfig`
    pub fn build(self) -> Result<SignedRest<ReqwestTransport>, ExchangeError> {
        let transport = ReqwestTransport::new(
            Duration::from_secs(self.config.timeout_seconds),
            &self.config.user_agent,
        )?;
        self.build_with_transport(transport)
    }

    /// Build on top of any transport, e.g. a test double
    pub fn build_with_transport<T: HttpTransport>(
        self,
        transport: T,
    ) -> Result<SignedRest<T>, ExchangeError> {
        let signer = self.signer.ok_or_else(|| {
            ExchangeError::ConfigurationError(
                "A signer is required: every request must be authenticated".to_string(),
            )
        })?;

        Ok(SignedRest {
            transport: Arc::new(transport),
            config: self.config,
            signer,
        })
    }
}

/// Request dispatcher
///
/// Canonicalizes parameters once, signs that exact string, sends it through the
/// transport and decodes the body of a `200 OK` as JSON. Holds no mutable
/// state, so clones can be used concurrently.
pub struct SignedRest<T> {
    transport: Arc<T>,
    config: RestClientConfig,
    signer: Arc<dyn Signer>,
}

impl<T> Clone for SignedRest<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: self.config.clone(),
            signer: Arc::clone(&self.signer),
        }
    }
}

impl<T> std::fmt::Debug for SignedRest<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> SignedRest<T> {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint.trim_start_matches('/'))
    }

    /// Compose the signed HTTP request for `method endpoint params`
    pub fn prepare(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &RequestParams,
    ) -> Result<HttpRequest, ExchangeError> {
        let canonical = canonicalize(params)?;
        let token = self
            .signer
            .sign_request(method.as_str(), endpoint, &canonical)?;

        if !token.covers(&canonical) {
            return Err(ExchangeError::SignatureMismatch);
        }

        let mut url = self.build_url(endpoint);
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        headers.extend(token.headers());

        let body = if canonical.is_empty() {
            None
        } else if method.carries_body() {
            headers.push(("Content-Type".to_string(), FORM_CONTENT_TYPE.to_string()));
            Some(canonical)
        } else {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&canonical);
            None
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Send one authenticated request and return the decoded JSON body
    #[instrument(skip(self, params), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint, param_count = params.len()))]
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &RequestParams,
    ) -> Result<Value, ExchangeError> {
        let request = self.prepare(method, endpoint, params)?;
        let response = self.transport.send(request).await?;

        if response.status != 200 {
            warn!(status = response.status, "Request rejected by exchange");
            return Err(ExchangeError::ApiError {
                code: response.status,
                message: response.body,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse JSON response: {}", e))
        })
    }

    /// Same as [`dispatch`](Self::dispatch) with a strongly-typed response
    pub async fn dispatch_json<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &RequestParams,
    ) -> Result<R, ExchangeError> {
        let value = self.dispatch(method, endpoint, params).await?;
        serde_json::from_value(value).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to deserialize JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::signer::{hash_query, SignatureResult, SignedToken};
    use crate::core::kernel::transport::HttpResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StaticSigner;

    impl Signer for StaticSigner {
        fn sign_request(&self, _method: &str, _endpoint: &str, query: &str) -> SignatureResult {
            let hash = (!query.is_empty()).then(|| hash_query(query));
            Ok(SignedToken::new("static-token".to_string(), hash))
        }
    }

    /// Signs a different query than the one it was given
    struct LyingSigner;

    impl Signer for LyingSigner {
        fn sign_request(&self, _method: &str, _endpoint: &str, _query: &str) -> SignatureResult {
            Ok(SignedToken::new(
                "token".to_string(),
                Some(hash_query("market=KRW-ETH")),
            ))
        }
    }

    struct CannedTransport {
        status: u16,
        body: &'static str,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ExchangeError> {
            self.sent.lock().unwrap().push(request);
            Ok(HttpResponse {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    fn client(signer: Arc<dyn Signer>, transport: CannedTransport) -> SignedRest<CannedTransport> {
        let config = RestClientConfig::new("https://api.upbit.com/v1/".to_string(), "upbit".to_string());
        RestClientBuilder::new(config)
            .with_signer(signer)
            .build_with_transport(transport)
            .unwrap()
    }

    fn market_params() -> RequestParams {
        let mut params = RequestParams::new();
        params.push("market", "KRW-BTC");
        params
    }

    #[test]
    fn test_builder_requires_signer() {
        let config = RestClientConfig::new("https://api.upbit.com/v1/".to_string(), "upbit".to_string());
        let result = RestClientBuilder::new(config).build_with_transport(CannedTransport::new(200, "{}"));
        assert!(matches!(result, Err(ExchangeError::ConfigurationError(_))));
    }

    #[test]
    fn test_get_puts_canonical_query_in_url() {
        let rest = client(Arc::new(StaticSigner), CannedTransport::new(200, "{}"));
        let request = rest
            .prepare(HttpMethod::Get, "orders/chance", &market_params())
            .unwrap();

        assert_eq!(request.url, "https://api.upbit.com/v1/orders/chance?market=KRW-BTC");
        assert!(request.body.is_none());
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("Authorization"), Some("Bearer static-token"));
        assert!(request.header("Content-Type").is_none());
    }

    #[test]
    fn test_post_puts_canonical_query_in_body() {
        let rest = client(Arc::new(StaticSigner), CannedTransport::new(200, "{}"));
        let request = rest
            .prepare(HttpMethod::Post, "orders", &market_params())
            .unwrap();

        assert_eq!(request.url, "https://api.upbit.com/v1/orders");
        assert_eq!(request.body.as_deref(), Some("market=KRW-BTC"));
        assert_eq!(request.header("Content-Type"), Some(FORM_CONTENT_TYPE));
    }

    #[test]
    fn test_no_params_means_no_query_and_no_body() {
        let rest = client(Arc::new(StaticSigner), CannedTransport::new(200, "[]"));
        let request = rest
            .prepare(HttpMethod::Get, "accounts", &RequestParams::new())
            .unwrap();

        assert_eq!(request.url, "https://api.upbit.com/v1/accounts");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_mismatched_signature_is_rejected() {
        let rest = client(Arc::new(LyingSigner), CannedTransport::new(200, "{}"));
        let result = rest.prepare(HttpMethod::Get, "orders/chance", &market_params());
        assert!(matches!(result, Err(ExchangeError::SignatureMismatch)));
    }

    #[tokio::test]
    async fn test_mismatched_signature_never_reaches_transport() {
        let rest = client(Arc::new(LyingSigner), CannedTransport::new(200, "{}"));
        let result = rest
            .dispatch(HttpMethod::Post, "orders", &market_params())
            .await;

        assert!(matches!(result, Err(ExchangeError::SignatureMismatch)));
        assert!(rest.transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_200_is_api_error_with_raw_body() {
        let rest = client(
            Arc::new(StaticSigner),
            CannedTransport::new(201, r#"{"created":true}"#),
        );
        let err = rest
            .dispatch(HttpMethod::Get, "accounts", &RequestParams::new())
            .await
            .unwrap_err();

        match err {
            ExchangeError::ApiError { code, message } => {
                assert_eq!(code, 201);
                assert_eq!(message, r#"{"created":true}"#);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_on_200_is_decode_error() {
        let rest = client(Arc::new(StaticSigner), CannedTransport::new(200, "<html>"));
        let err = rest
            .dispatch(HttpMethod::Get, "accounts", &RequestParams::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ExchangeError::DeserializationError(_)));
    }

    #[tokio::test]
    async fn test_dispatch_json_typed() {
        let rest = client(
            Arc::new(StaticSigner),
            CannedTransport::new(200, r#"[{"currency":"KRW"}]"#),
        );
        let accounts: Vec<std::collections::HashMap<String, String>> = rest
            .dispatch_json(HttpMethod::Get, "accounts", &RequestParams::new())
            .await
            .unwrap();

        assert_eq!(accounts[0]["currency"], "KRW");
    }
}
