//! Environment-sourced configuration for the SD-WAN monitoring crates.
//!
//! All settings come from the process environment (the controller address
//! and credentials under the `SDWAN_` prefix, operational knobs unprefixed)
//! with defaults matching a lab controller. The resolved [`Config`]
//! translates into `sdmon_api` construction parameters.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use sdmon_api::{Client, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("client construction failed: {0}")]
    Client(#[from] sdmon_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config ──────────────────────────────────────────────────────────

/// Resolved configuration.
///
/// `session_timeout`, `auto_reconnect`, and `log_level` are consumed by the
/// hosting process; the client itself only needs the URL, credentials, and
/// transport knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Controller base URL (`SDWAN_BASE_URL`).
    pub base_url: String,

    /// Login username (`SDWAN_USERNAME`).
    pub username: String,

    /// Login password (`SDWAN_PASSWORD`). Plaintext from the environment;
    /// wrapped in a secret before it reaches the client.
    pub password: String,

    /// Verify the controller's TLS certificate (`VERIFY_SSL`).
    pub verify_ssl: bool,

    /// Advisory session lifetime in seconds (`SESSION_TIMEOUT`).
    pub session_timeout: u64,

    /// Re-login automatically on session expiry (`AUTO_RECONNECT`).
    pub auto_reconnect: bool,

    /// Per-request timeout in seconds (`REQUEST_TIMEOUT`).
    pub request_timeout: u64,

    /// Log filter for the hosting process (`LOG_LEVEL`).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://192.168.10.130:8443".into(),
            username: "admin".into(),
            password: "1".into(),
            verify_ssl: false,
            session_timeout: 3600,
            auto_reconnect: true,
            request_timeout: 30,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Load configuration from the environment over built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("SDWAN_"))
            .merge(Env::raw().only(&[
                "verify_ssl",
                "session_timeout",
                "auto_reconnect",
                "request_timeout",
                "log_level",
            ]))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "username".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Parsed controller base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// The password as a secret.
    pub fn password(&self) -> SecretString {
        self.password.clone().into()
    }

    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            verify_ssl: self.verify_ssl,
            timeout: Duration::from_secs(self.request_timeout),
            cookie_jar: None,
        }
    }

    /// Build an API client from this configuration.
    pub fn build_client(&self) -> Result<Client, ConfigError> {
        let client = Client::new(
            self.base_url()?,
            self.username.clone(),
            self.password(),
            &self.transport(),
        )?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_lab_controller() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load().expect("defaults load");
            assert_eq!(config.base_url, "https://192.168.10.130:8443");
            assert_eq!(config.username, "admin");
            assert!(!config.verify_ssl);
            assert_eq!(config.request_timeout, 30);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SDWAN_BASE_URL", "https://10.1.1.1:8443");
            jail.set_env("SDWAN_USERNAME", "operator");
            jail.set_env("VERIFY_SSL", "true");
            jail.set_env("SESSION_TIMEOUT", "60");

            let config = Config::load().expect("env load");
            assert_eq!(config.base_url, "https://10.1.1.1:8443");
            assert_eq!(config.username, "operator");
            assert!(config.verify_ssl);
            assert_eq!(config.session_timeout, 60);
            Ok(())
        });
    }

    #[test]
    fn empty_username_is_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SDWAN_USERNAME", "");
            let err = Config::load().expect_err("empty username");
            assert!(matches!(err, ConfigError::Validation { .. }));
            Ok(())
        });
    }

    #[test]
    fn bad_base_url_surfaces_as_error() {
        let config = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(config.base_url(), Err(ConfigError::InvalidUrl(_))));
    }
}
