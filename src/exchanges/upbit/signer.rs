use crate::core::errors::ExchangeError;
use crate::core::kernel::{hash_query, SignatureResult, SignedToken, Signer, QUERY_HASH_ALG};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Namespace tag in front of every nonce
pub const NONCE_PREFIX: &str = "SSR_";

/// JWT claims expected by the Upbit API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub access_key: String,
    pub nonce: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub query_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub query_hash_alg: Option<String>,
}

/// HS256 JWT signer for Upbit
///
/// Every token carries a fresh nonce and, when the request has parameters, the
/// SHA-512 hash of their canonical form.
pub struct UpbitSigner {
    access_key: String,
    secret_key: Secret<String>,
}

impl UpbitSigner {
    pub fn new(access_key: String, secret_key: String) -> Result<Self, ExchangeError> {
        if access_key.trim().is_empty() {
            return Err(ExchangeError::ConfigurationError(
                "Upbit access key is empty".to_string(),
            ));
        }
        if secret_key.trim().is_empty() {
            return Err(ExchangeError::ConfigurationError(
                "Upbit secret key is empty".to_string(),
            ));
        }

        Ok(Self {
            access_key,
            secret_key: Secret::new(secret_key),
        })
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Build the claims for one request
    pub fn claims(&self, canonical_query: &str) -> Claims {
        let query_hash = (!canonical_query.is_empty()).then(|| hash_query(canonical_query));

        Claims {
            access_key: self.access_key.clone(),
            nonce: generate_nonce(),
            query_hash_alg: query_hash.as_ref().map(|_| QUERY_HASH_ALG.to_string()),
            query_hash,
        }
    }

    /// Encode and sign claims as a compact JWT
    pub fn sign_claims(&self, claims: &Claims) -> Result<String, ExchangeError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret_key.expose_secret().as_bytes()),
        )
        .map_err(|e| ExchangeError::AuthError(format!("Failed to sign JWT: {}", e)))
    }
}

impl Signer for UpbitSigner {
    fn sign_request(&self, _method: &str, _endpoint: &str, canonical_query: &str) -> SignatureResult {
        let claims = self.claims(canonical_query);
        let token = self.sign_claims(&claims)?;
        Ok(SignedToken::new(token, claims.query_hash))
    }
}

/// Single-use nonce: prefix, microsecond clock and 64 random bits
pub fn generate_nonce() -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or_default();

    format!("{}{:x}-{:016x}", NONCE_PREFIX, micros, rand::random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
    use std::collections::HashSet;

    fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .map(|data| data.claims)
    }

    fn signer() -> UpbitSigner {
        UpbitSigner::new("access".to_string(), "secret".to_string()).unwrap()
    }

    #[test]
    fn test_empty_keys_are_configuration_errors() {
        let err = UpbitSigner::new("access".to_string(), String::new()).err().unwrap();
        assert!(err.is_configuration_error());

        let err = UpbitSigner::new(" ".to_string(), "secret".to_string()).err().unwrap();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_token_without_params_has_no_query_hash() {
        let signed = signer().sign_request("GET", "accounts", "").unwrap();
        assert!(signed.query_hash().is_none());

        let claims = verify(signed.token(), "secret").unwrap();
        assert_eq!(claims.access_key, "access");
        assert!(claims.nonce.starts_with(NONCE_PREFIX));
        assert!(claims.query_hash.is_none());
        assert!(claims.query_hash_alg.is_none());
    }

    #[test]
    fn test_token_binds_query_hash() {
        let query = "market=KRW-BTC&side=bid";
        let signed = signer().sign_request("POST", "orders", query).unwrap();

        let claims = verify(signed.token(), "secret").unwrap();
        assert_eq!(claims.query_hash.as_deref(), Some(hash_query(query).as_str()));
        assert_eq!(claims.query_hash_alg.as_deref(), Some("SHA512"));
        assert!(signed.covers(query));
    }

    #[test]
    fn test_token_is_hs256_jwt() {
        let signed = signer().sign_request("GET", "accounts", "").unwrap();
        assert_eq!(signed.token().split('.').count(), 3);
        assert_eq!(decode_header(signed.token()).unwrap().alg, Algorithm::HS256);
    }

    #[test]
    fn test_same_params_yield_different_tokens() {
        let signer = signer();
        let first = signer.sign_request("GET", "orders/chance", "market=KRW-BTC").unwrap();
        let second = signer.sign_request("GET", "orders/chance", "market=KRW-BTC").unwrap();

        assert_ne!(first.token(), second.token());
        let a = verify(first.token(), "secret").unwrap();
        let b = verify(second.token(), "secret").unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_eq!(a.query_hash, b.query_hash);
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let signed = signer().sign_request("GET", "accounts", "").unwrap();
        assert!(verify(signed.token(), "other-secret").is_err());
    }

    #[test]
    fn test_nonces_are_unique() {
        let nonces: HashSet<String> = (0..1000).map(|_| generate_nonce()).collect();
        assert_eq!(nonces.len(), 1000);
    }
}
