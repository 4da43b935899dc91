//! Runtime configuration read from `ROSTER_*` environment variables.

use std::net::SocketAddr;

use roster_observability::LogFormat;
use thiserror::Error;

pub const ENV_BIND_ADDR: &str = "ROSTER_BIND_ADDR";
pub const ENV_PUBLIC_BASE_URL: &str = "ROSTER_PUBLIC_BASE_URL";
pub const ENV_DEFAULT_PAGE_SIZE: &str = "ROSTER_DEFAULT_PAGE_SIZE";
pub const ENV_MAX_PAGE_SIZE: &str = "ROSTER_MAX_PAGE_SIZE";
pub const ENV_LOG_FORMAT: &str = "ROSTER_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: invalid value `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("max page size ({max}) must be at least the default page size ({default})")]
    PageSizeBounds { default: u32, max: u32 },
}

/// Page size bounds applied to the list endpoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PagingLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PagingLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Base for `Location` and paging links; `http://{Host}` when unset.
    pub public_base_url: Option<String>,
    pub paging: PagingLimits,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            public_base_url: None,
            paging: PagingLimits::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(ENV_BIND_ADDR) {
            config.bind_addr = raw
                .trim()
                .parse()
                .map_err(|e: std::net::AddrParseError| invalid(ENV_BIND_ADDR, &raw, e))?;
        }

        config.public_base_url = get(ENV_PUBLIC_BASE_URL).map(|v| v.trim().trim_end_matches('/').to_string());

        if let Some(raw) = get(ENV_DEFAULT_PAGE_SIZE) {
            config.paging.default_page_size = parse_page_size(ENV_DEFAULT_PAGE_SIZE, &raw)?;
        }
        if let Some(raw) = get(ENV_MAX_PAGE_SIZE) {
            config.paging.max_page_size = parse_page_size(ENV_MAX_PAGE_SIZE, &raw)?;
        }
        if config.paging.max_page_size < config.paging.default_page_size {
            return Err(ConfigError::PageSizeBounds {
                default: config.paging.default_page_size,
                max: config.paging.max_page_size,
            });
        }

        if let Some(raw) = get(ENV_LOG_FORMAT) {
            config.log_format = raw.parse::<LogFormat>().map_err(|e| invalid(ENV_LOG_FORMAT, &raw, e))?;
        }

        Ok(config)
    }
}

fn parse_page_size(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let value: u32 = raw.trim().parse().map_err(|e| invalid(key, raw, e))?;
    if value == 0 {
        return Err(invalid(key, raw, "must be at least 1"));
    }
    Ok(value)
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:5000");
        assert_eq!(config.paging.max_page_size, 20);
    }

    #[test]
    fn reads_all_keys() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
            (ENV_PUBLIC_BASE_URL, "https://users.example.com/"),
            (ENV_DEFAULT_PAGE_SIZE, "5"),
            (ENV_MAX_PAGE_SIZE, "50"),
            (ENV_LOG_FORMAT, "text"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.public_base_url.as_deref(), Some("https://users.example.com"));
        assert_eq!(config.paging, PagingLimits { default_page_size: 5, max_page_size: 50 });
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = ApiConfig::from_lookup(lookup(&[(ENV_BIND_ADDR, "nowhere")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_BIND_ADDR, .. }));
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = ApiConfig::from_lookup(lookup(&[(ENV_DEFAULT_PAGE_SIZE, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: ENV_DEFAULT_PAGE_SIZE, .. }));
    }

    #[test]
    fn rejects_max_below_default() {
        let err = ApiConfig::from_lookup(lookup(&[
            (ENV_DEFAULT_PAGE_SIZE, "30"),
            (ENV_MAX_PAGE_SIZE, "20"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::PageSizeBounds { default: 30, max: 20 });
    }
}
