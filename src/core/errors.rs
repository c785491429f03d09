use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    ApiError { code: u16, message: String },

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Signed query hash does not match the transmitted parameters")]
    SignatureMismatch,
}

impl ExchangeError {
    /// HTTP status code for errors that came back from the exchange
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request never reached the network because of bad input
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidParameters(_))
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ConfigurationError(_) | Self::ConfigError(_))
    }
}
