use crate::api::api_football::{API_FOOTBALL_BASE_URL, API_FOOTBALL_HOST};
use crate::service::DEFAULT_CACHE_TTL;
use crate::utils::normalize::{offset_from_hours, DEFAULT_UTC_OFFSET_HOURS};
use chrono::FixedOffset;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set in environment or .env file")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub api_host: String,
    pub cache_ttl: Duration,
    pub utc_offset: FixedOffset,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read settings from the process environment (call `dotenv` first)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get("API_KEY").ok_or(ConfigError::Missing("API_KEY"))?;

        let cache_ttl_secs: u64 = parse_or(&get, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL.as_secs())?;

        let offset_hours: i32 = parse_or(&get, "UTC_OFFSET_HOURS", DEFAULT_UTC_OFFSET_HOURS)?;
        let utc_offset = offset_from_hours(offset_hours).ok_or(ConfigError::Invalid {
            name: "UTC_OFFSET_HOURS",
            value: offset_hours.to_string(),
        })?;

        let ip: IpAddr = parse_or(&get, "BIND_ADDR", IpAddr::V4(Ipv4Addr::LOCALHOST))?;
        let port: u16 = parse_or(&get, "PORT", 3000)?;

        Ok(Self {
            api_key,
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| API_FOOTBALL_BASE_URL.to_string()),
            api_host: get("API_HOST").unwrap_or_else(|| API_FOOTBALL_HOST.to_string()),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            utc_offset,
            bind_addr: SocketAddr::new(ip, port),
        })
    }
}

fn parse_or<T, G>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("API_KEY", "secret")]).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_base_url, API_FOOTBALL_BASE_URL);
        assert_eq!(config.api_host, API_FOOTBALL_HOST);
        assert_eq!(config.cache_ttl, Duration::from_secs(43_200));
        assert_eq!(config.utc_offset.local_minus_utc(), -3 * 3600);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_missing_api_key() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("API_KEY"));
        assert_eq!(
            load(&[("API_KEY", "  ")]).unwrap_err(),
            ConfigError::Missing("API_KEY")
        );
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("API_KEY", "secret"),
            ("CACHE_TTL_SECS", "300"),
            ("UTC_OFFSET_HOURS", "1"),
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "8080"),
        ])
        .unwrap();

        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.utc_offset.local_minus_utc(), 3600);
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            load(&[("API_KEY", "k"), ("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid {
                name: "PORT",
                value: "http".to_string()
            }
        );
        assert!(matches!(
            load(&[("API_KEY", "k"), ("UTC_OFFSET_HOURS", "30")]).unwrap_err(),
            ConfigError::Invalid { name: "UTC_OFFSET_HOURS", .. }
        ));
    }
}
