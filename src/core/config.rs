use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Default REST endpoint of the Upbit open API
pub const DEFAULT_BASE_URL: &str = "https://api.upbit.com/v1/";

/// Session credentials plus endpoint override
///
/// Keys are immutable once the config is built and are held as [`Secret`] so that
/// they never show up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    access_key: Secret<String>,
    secret_key: Secret<String>,
    pub base_url: Option<String>,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for ExchangeConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ExchangeConfig", 3)?;
        state.serialize_field("access_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.serialize_field("base_url", &self.base_url)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExchangeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ExchangeConfigHelper {
            access_key: String,
            secret_key: String,
            #[serde(default)]
            base_url: Option<String>,
        }

        let helper = ExchangeConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            access_key: Secret::new(helper.access_key),
            secret_key: Secret::new(helper.secret_key),
            base_url: helper.base_url,
        })
    }
}

impl ExchangeConfig {
    /// Create a new configuration with API credentials
    #[must_use]
    pub fn new(access_key: String, secret_key: String) -> Self {
        Self {
            access_key: Secret::new(access_key),
            secret_key: Secret::new(secret_key),
            base_url: None,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_ACCESS_KEY` (e.g., `UPBIT_ACCESS_KEY`)
    /// - `{PREFIX}_SECRET_KEY` (e.g., `UPBIT_SECRET_KEY`)
    /// - `{PREFIX}_BASE_URL` (optional)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let access_key_var = format!("{}_ACCESS_KEY", prefix);
        let secret_key_var = format!("{}_SECRET_KEY", prefix);
        let base_url_var = format!("{}_BASE_URL", prefix);

        let access_key = env::var(&access_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(access_key_var))?;

        let secret_key = env::var(&secret_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(secret_key_var))?;

        let base_url = env::var(&base_url_var).ok();

        Ok(Self {
            access_key: Secret::new(access_key),
            secret_key: Secret::new(secret_key),
            base_url,
        })
    }

    /// Create configuration from a `.env` file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    ///
    /// A missing file is fine; system environment variables are used instead.
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    /// Check if this configuration has credentials for authenticated operations
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.access_key.expose_secret().trim().is_empty()
            && !self.secret_key.expose_secret().trim().is_empty()
    }

    /// Set custom base URL
    #[must_use]
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Base URL with a guaranteed trailing slash, falling back to the public endpoint
    pub fn resolved_base_url(&self) -> String {
        let url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        if url.ends_with('/') {
            url.to_string()
        } else {
            format!("{}/", url)
        }
    }

    /// Get access key (use carefully - exposes secret)
    pub fn access_key(&self) -> &str {
        self.access_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
