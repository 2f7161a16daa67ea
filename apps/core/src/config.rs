//! Gateway configuration loaded from the environment.
//!
//! Reads a `.env` file when present, then the process environment. Only the
//! provider URL and API key are mandatory; everything else has a default.

use std::env;
use std::time::Duration;
use url::Url;

use crate::error::AppError;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_RATE_LIMIT: usize = 30;
const DEFAULT_RATE_WINDOW_SECS: u64 = 60;
const DEFAULT_MODEL_KEY: &str = "conversational";

/// Runtime configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the upstream completion provider.
    pub provider_url: Url,
    /// Bearer token sent with every provider request.
    pub api_key: String,
    /// Hard timeout for a single completion request.
    pub request_timeout: Duration,
    /// Requests allowed per client per window.
    pub rate_limit: usize,
    /// Sliding window duration for rate limiting.
    pub rate_window: Duration,
    /// Registry key used when selection falls through to the default.
    pub default_model: String,
}

impl GatewayConfig {
    /// Loads configuration from the environment.
    ///
    /// `RESPONA_PROVIDER_URL` and `RESPONA_API_KEY` are required; the rest
    /// fall back to defaults when unset or unparseable.
    pub fn from_env() -> Result<Self, AppError> {
        let provider_url = env::var("RESPONA_PROVIDER_URL")
            .map_err(|_| AppError::Config("RESPONA_PROVIDER_URL is not set".to_string()))?;
        let provider_url = Url::parse(&provider_url)
            .map_err(|e| AppError::Config(format!("RESPONA_PROVIDER_URL is invalid: {}", e)))?;

        let api_key = env::var("RESPONA_API_KEY")
            .map_err(|_| AppError::Config("RESPONA_API_KEY is not set".to_string()))?;
        if api_key.trim().is_empty() {
            return Err(AppError::Config("RESPONA_API_KEY is empty".to_string()));
        }

        Ok(Self {
            provider_url,
            api_key,
            request_timeout: Duration::from_secs(env_or(
                "RESPONA_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            rate_limit: env_or("RESPONA_RATE_LIMIT", DEFAULT_RATE_LIMIT),
            rate_window: Duration::from_secs(env_or(
                "RESPONA_RATE_WINDOW_SECS",
                DEFAULT_RATE_WINDOW_SECS,
            )),
            default_model: env::var("RESPONA_DEFAULT_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL_KEY.to_string()),
        })
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_provider_url() {
        temp_env::with_vars_unset(["RESPONA_PROVIDER_URL", "RESPONA_API_KEY"], || {
            let err = GatewayConfig::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(_)));
        });
    }

    #[test]
    fn test_from_env_rejects_invalid_url() {
        temp_env::with_vars(
            [
                ("RESPONA_PROVIDER_URL", Some("not a url")),
                ("RESPONA_API_KEY", Some("secret")),
            ],
            || {
                let err = GatewayConfig::from_env().unwrap_err();
                assert!(matches!(err, AppError::Config(_)));
            },
        );
    }

    #[test]
    fn test_from_env_applies_defaults() {
        temp_env::with_vars(
            [
                ("RESPONA_PROVIDER_URL", Some("https://llm.example.com")),
                ("RESPONA_API_KEY", Some("secret")),
                ("RESPONA_TIMEOUT_SECS", None),
                ("RESPONA_RATE_LIMIT", None),
            ],
            || {
                let config = GatewayConfig::from_env().unwrap();
                assert_eq!(config.request_timeout, Duration::from_secs(60));
                assert_eq!(config.rate_limit, 30);
                assert_eq!(config.default_model, "conversational");
            },
        );
    }

    #[test]
    fn test_from_env_reads_overrides() {
        temp_env::with_vars(
            [
                ("RESPONA_PROVIDER_URL", Some("https://llm.example.com")),
                ("RESPONA_API_KEY", Some("secret")),
                ("RESPONA_RATE_LIMIT", Some("5")),
                ("RESPONA_DEFAULT_MODEL", Some("reasoning")),
            ],
            || {
                let config = GatewayConfig::from_env().unwrap();
                assert_eq!(config.rate_limit, 5);
                assert_eq!(config.default_model, "reasoning");
            },
        );
    }
}
