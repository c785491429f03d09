/// Exchange-agnostic request pipeline
///
/// The kernel turns `(method, endpoint, params)` into an authenticated HTTP
/// round-trip. It is split into small, separately testable pieces:
///
/// - [`codec`]: `RequestParams` to the canonical query string
/// - [`signer`]: the `Signer` seam plus the SHA-512 query hash
/// - [`transport`]: the `HttpTransport` seam and its reqwest implementation
/// - [`rest`]: `SignedRest`, the dispatcher gluing the three together
///
/// The canonical string is computed exactly once per request. The signer hashes
/// it and the dispatcher transmits it unchanged, so what is signed is what is sent.
///
/// ```rust,no_run
/// use upbitx::core::kernel::*;
/// use upbitx::core::types::RequestParams;
/// use upbitx::exchanges::upbit::UpbitSigner;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let signer = Arc::new(UpbitSigner::new("access".to_string(), "secret".to_string())?);
/// let config = RestClientConfig::new("https://api.upbit.com/v1/".to_string(), "upbit".to_string());
/// let rest = RestClientBuilder::new(config).with_signer(signer).build()?;
///
/// let mut params = RequestParams::new();
/// params.push("market", "KRW-BTC");
/// let chance = rest.dispatch(HttpMethod::Get, "orders/chance", &params).await?;
/// # Ok(())
/// # }
/// ```
pub mod codec;
pub mod rest;
pub mod signer;
pub mod transport;

pub use codec::canonicalize;
pub use rest::{RestClientBuilder, RestClientConfig, SignedRest};
pub use signer::{hash_query, SignatureResult, SignedToken, Signer, QUERY_HASH_ALG};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
