//! Gateway configuration.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional `altscore.toml` in the working directory, then environment
//! variables. The binary loads `.env` before calling [`GatewayConfig::load`],
//! so a `.env` file behaves like real environment variables.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `ALT_SCORE_API_BASE_URL` | yes | |
//! | `API_KEY` | yes | |
//! | `HOST` | no | `0.0.0.0` |
//! | `PORT` | no | `3001` |
//! | `UPSTREAM_TIMEOUT_MS` | no | `10000` |
//! | `STATIC_DIR` | no | `dist` |

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialized.
    #[error("config source error: {0}")]
    Source(#[from] config::ConfigError),

    /// A value was present but unusable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete gateway configuration.
#[derive(Clone, serde::Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the upstream scoring API (e.g. `https://api.example.com`).
    #[serde(rename = "alt_score_api_base_url")]
    pub upstream_base_url: String,
    /// Static credential sent as the `API-KEY` header.
    pub api_key: String,
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Timeout for a single upstream request, in milliseconds.
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,
    /// Directory holding the compiled frontend bundle.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3001
}

const fn default_upstream_timeout_ms() -> u64 {
    10_000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

impl GatewayConfig {
    /// Load configuration from `altscore.toml` (optional) and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required key is missing or a value is
    /// malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("altscore").required(false))
            .add_source(config::Environment::default())
            .build()?;
        Self::from_settings(settings)
    }

    /// Deserialize and validate an already-built settings tree.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if deserialization or validation fails.
    pub fn from_settings(settings: config::Config) -> Result<Self, ConfigError> {
        let mut config: Self = settings.try_deserialize()?;
        config.upstream_base_url = config.upstream_base_url.trim_end_matches('/').to_owned();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.upstream_base_url.starts_with("http://")
            || self.upstream_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "ALT_SCORE_API_BASE_URL must be an http(s) URL, got {:?}",
                self.upstream_base_url
            )));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("API_KEY must not be empty".to_owned()));
        }
        if self.upstream_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "UPSTREAM_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Upstream request timeout.
    pub const fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("upstream_base_url", &self.upstream_base_url)
            .field("api_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("upstream_timeout_ms", &self.upstream_timeout_ms)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> config::Config {
        let mut builder = config::Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn defaults_apply_when_only_required_keys_present() {
        let config = GatewayConfig::from_settings(settings(&[
            ("alt_score_api_base_url", "https://scoring.example.com/"),
            ("api_key", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.upstream_base_url, "https://scoring.example.com");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.bind_address(), "0.0.0.0:3001");
    }

    #[test]
    fn numeric_strings_are_parsed() {
        let config = GatewayConfig::from_settings(settings(&[
            ("alt_score_api_base_url", "http://localhost:9000"),
            ("api_key", "secret"),
            ("port", "8088"),
            ("upstream_timeout_ms", "2500"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.upstream_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let result = GatewayConfig::from_settings(settings(&[(
            "alt_score_api_base_url",
            "http://localhost:9000",
        )]));
        assert!(matches!(result, Err(ConfigError::Source(_))));
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let result = GatewayConfig::from_settings(settings(&[
            ("alt_score_api_base_url", "ftp://scoring.example.com"),
            ("api_key", "secret"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = GatewayConfig::from_settings(settings(&[
            ("alt_score_api_base_url", "http://localhost:9000"),
            ("api_key", "super-secret-key"),
        ]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
