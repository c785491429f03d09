use crate::core::errors::ExchangeError;
use sha2::{Digest, Sha512};
use std::collections::HashMap;

/// Algorithm tag that accompanies every query hash
pub const QUERY_HASH_ALG: &str = "SHA512";

/// Result type for signing operations
pub type SignatureResult = Result<SignedToken, ExchangeError>;

/// A bearer credential produced for exactly one request
///
/// Tokens carry a fresh nonce and are never reused. `query_hash` records which
/// canonical query string the token was bound to so the dispatcher can refuse
/// to send anything else.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken {
    token: String,
    query_hash: Option<String>,
}

impl SignedToken {
    pub fn new(token: String, query_hash: Option<String>) -> Self {
        Self { token, query_hash }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn query_hash(&self) -> Option<&str> {
        self.query_hash.as_deref()
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Headers to attach to the outgoing request
    pub fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), self.bearer());
        headers
    }

    /// Check that the token was signed over `canonical_query`
    pub fn covers(&self, canonical_query: &str) -> bool {
        match &self.query_hash {
            None => canonical_query.is_empty(),
            Some(hash) => !canonical_query.is_empty() && *hash == hash_query(canonical_query),
        }
    }
}

impl std::fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedToken")
            .field("token", &"[REDACTED]")
            .field("query_hash", &self.query_hash)
            .finish()
    }
}

/// Signer trait for request authentication
///
/// Implementations receive the canonical query string produced by
/// [`canonicalize`](crate::core::kernel::codec::canonicalize); an empty string
/// means the request has no parameters.
pub trait Signer: Send + Sync {
    fn sign_request(&self, method: &str, endpoint: &str, canonical_query: &str)
        -> SignatureResult;
}

/// Lowercase hex SHA-512 of a canonical query string
pub fn hash_query(canonical_query: &str) -> String {
    hex::encode(Sha512::digest(canonical_query.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_query_is_lowercase_sha512_hex() {
        let hash = hash_query("market=KRW-BTC");
        assert_eq!(hash.len(), 128);
        assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(hash, hash_query("market=KRW-BTC"));
        assert_ne!(hash, hash_query("market=KRW-ETH"));
    }

    #[test]
    fn test_hash_query_known_vector() {
        assert_eq!(
            hash_query("abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_token_covers_only_signed_query() {
        let token = SignedToken::new("t".to_string(), Some(hash_query("a=1")));
        assert!(token.covers("a=1"));
        assert!(!token.covers("a=2"));
        assert!(!token.covers(""));

        let bare = SignedToken::new("t".to_string(), None);
        assert!(bare.covers(""));
        assert!(!bare.covers("a=1"));
    }

    #[test]
    fn test_debug_hides_token() {
        let token = SignedToken::new("secret.jwt.value".to_string(), None);
        assert!(!format!("{:?}", token).contains("secret.jwt.value"));
        assert_eq!(token.bearer(), "Bearer secret.jwt.value");
    }
}
