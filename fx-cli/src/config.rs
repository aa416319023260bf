//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use fx_client::DEFAULT_API_URL;
use fx_service::DEFAULT_TTL;
use fx_types::SupportedCurrencies;

/// Converter configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub cache_ttl: Duration,
    pub supported: SupportedCurrencies,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_ttl: DEFAULT_TTL,
            supported: SupportedCurrencies::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let api_url = lookup("FX_API_URL").unwrap_or(defaults.api_url);

        let cache_ttl = match lookup("FX_CACHE_TTL_MS") {
            Some(ms) => Duration::from_millis(
                ms.trim()
                    .parse()
                    .map_err(|e| anyhow::anyhow!("FX_CACHE_TTL_MS must be milliseconds: {}", e))?,
            ),
            None => defaults.cache_ttl,
        };

        let supported = match lookup("FX_SUPPORTED_CURRENCIES") {
            Some(list) => list
                .parse()
                .map_err(|e| anyhow::anyhow!("FX_SUPPORTED_CURRENCIES: {}", e))?,
            None => defaults.supported,
        };

        Ok(Self {
            api_url,
            cache_ttl,
            supported,
        })
    }
}
