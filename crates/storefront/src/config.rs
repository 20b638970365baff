//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPFLOW_DATA_DIR` - Directory holding the persisted cart (default: `.shopflow`)
//! - `SHOPFLOW_CART_KEY` - Storage key for the cart slot (default: `shopflow-cart`)
//! - `SHOPFLOW_SIMULATE_LATENCY` - Sleep on repository calls like a remote API (default: true)
//! - `SHOPFLOW_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Fraction of errors sent to Sentry (default: 1.0)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;
use crate::repository::Latency;

const DEFAULT_DATA_DIR: &str = ".shopflow";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed cart slot
    pub data_dir: PathBuf,
    /// Key the cart is stored under
    pub cart_key: String,
    /// Simulated repository latency
    pub latency: Latency,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry error tracking
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Fraction of error events to send
    pub sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            latency: Latency::simulated(),
            log_format: LogFormat::Pretty,
            sentry: SentryConfig::default(),
        }
    }
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars(&lookup);

        let data_dir = PathBuf::from(vars.or_default("SHOPFLOW_DATA_DIR", DEFAULT_DATA_DIR));
        let cart_key = vars.or_default("SHOPFLOW_CART_KEY", DEFAULT_CART_KEY);
        if cart_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFLOW_CART_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let latency = if vars.parse_or("SHOPFLOW_SIMULATE_LATENCY", true, parse_bool)? {
            Latency::simulated()
        } else {
            Latency::none()
        };
        let log_format =
            vars.parse_or("SHOPFLOW_LOG_FORMAT", LogFormat::Pretty, str::parse::<LogFormat>)?;

        let sentry = SentryConfig {
            dsn: vars.optional("SENTRY_DSN"),
            environment: vars.optional("SENTRY_ENVIRONMENT"),
            sample_rate: vars.parse_or("SENTRY_SAMPLE_RATE", 1.0, parse_sample_rate)?,
        };

        Ok(Self {
            data_dir,
            cart_key,
            latency,
            log_format,
            sentry,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(
        &self,
        key: &str,
        default: T,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, ConfigError> {
        self.optional(key).map_or(Ok(default), |value| {
            parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e))
        })
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got '{other}'")),
    }
}

fn parse_sample_rate(value: &str) -> Result<f32, String> {
    let rate: f32 = value.trim().parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("must be between 0.0 and 1.0 (got {rate})"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".shopflow"));
        assert_eq!(config.cart_key, "shopflow-cart");
        assert!(config.latency.is_enabled());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.sentry, SentryConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOPFLOW_DATA_DIR", "/var/lib/shopflow"),
            ("SHOPFLOW_CART_KEY", "guest-cart"),
            ("SHOPFLOW_SIMULATE_LATENCY", "off"),
            ("SHOPFLOW_LOG_FORMAT", "JSON"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/shopflow"));
        assert_eq!(config.cart_key, "guest-cart");
        assert!(!config.latency.is_enabled());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.sentry.dsn.as_deref(),
            Some("https://key@sentry.example/1")
        );
        assert!((config.sentry.sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("SHOPFLOW_CART_KEY", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.cart_key, "shopflow-cart");
        assert_eq!(config.sentry.dsn, None);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("SHOPFLOW_SIMULATE_LATENCY", "sometimes")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPFLOW_SIMULATE_LATENCY"));

        assert!(load(&[("SHOPFLOW_LOG_FORMAT", "xml")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "1.5")]).is_err());
        assert!(load(&[("SENTRY_SAMPLE_RATE", "half")]).is_err());
    }
}
