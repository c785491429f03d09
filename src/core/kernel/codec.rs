use crate::core::errors::ExchangeError;
use crate::core::types::{ParamValue, RequestParams};

/// Canonical form of a parameter mapping
///
/// This is the one string that gets hashed into the token *and* put on the wire,
/// so both sides of the signature agree byte-for-byte. Entries keep their
/// insertion order, each component is `application/x-www-form-urlencoded`, and
/// list values become repeated `key[]=value` pairs.
pub fn canonicalize(params: &RequestParams) -> Result<String, ExchangeError> {
    let mut pairs = Vec::with_capacity(params.len());

    for (key, value) in params.iter() {
        match value {
            ParamValue::Text(text) => pairs.push(encode_pair(key, text, false)?),
            ParamValue::List(items) => {
                for item in items {
                    pairs.push(encode_pair(key, item, true)?);
                }
            }
        }
    }

    Ok(pairs.join("&"))
}

fn encode_pair(key: &str, value: &str, list: bool) -> Result<String, ExchangeError> {
    let encoded = serde_urlencoded::to_string([(key, value)]).map_err(|e| {
        ExchangeError::InvalidParameters(format!("Failed to encode parameter '{}': {}", key, e))
    })?;

    if !list {
        return Ok(encoded);
    }

    // An encoded key never contains '=', so the first one separates key from value.
    Ok(match encoded.split_once('=') {
        Some((k, v)) => format!("{}[]={}", k, v),
        None => format!("{}[]=", encoded),
    })
}
