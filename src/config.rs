//! Application configuration.
//!
//! Constants plus `AppConfig`, resolved from `SURGE_*` environment
//! variables with a default for every field. A value that fails to parse
//! is logged and replaced by its default so a typo never stops the service.

use std::net::SocketAddr;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "SurgeSentinel";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

const ENV_API_BASE_URL: &str = "SURGE_API_BASE_URL";
const ENV_CACHE_TTL_SECS: &str = "SURGE_CACHE_TTL_SECS";
const ENV_HTTP_TIMEOUT_SECS: &str = "SURGE_HTTP_TIMEOUT_SECS";
const ENV_NOTIFY_TIMEOUT_SECS: &str = "SURGE_NOTIFY_TIMEOUT_SECS";
const ENV_BIND_ADDR: &str = "SURGE_BIND_ADDR";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "surge_sentinel_lib=info,surge_sentinel=info,tower_http=warn"
}

/// Runtime configuration for the gateway, cache and API server.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the hospital data service.
    pub api_base_url: String,
    /// Lifetime of a memoized fetch.
    pub cache_ttl: Duration,
    /// Per-request timeout for the three read endpoints.
    pub http_timeout_secs: u64,
    /// Bounded wait for the staff-notification POST.
    pub notify_timeout_secs: u64,
    /// Address the JSON API listens on.
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            notify_timeout_secs: DEFAULT_NOTIFY_TIMEOUT_SECS,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a closure over a map instead
    /// of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup(ENV_API_BASE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);

        let cache_ttl = parse_or(&lookup, ENV_CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS);
        let http_timeout_secs = parse_or(&lookup, ENV_HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS);
        let notify_timeout_secs =
            parse_or(&lookup, ENV_NOTIFY_TIMEOUT_SECS, DEFAULT_NOTIFY_TIMEOUT_SECS);
        let bind_addr = parse_or(&lookup, ENV_BIND_ADDR, defaults.bind_addr);

        Self {
            api_base_url,
            cache_ttl: Duration::from_secs(cache_ttl),
            http_timeout_secs,
            notify_timeout_secs,
            bind_addr,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, %default, "Invalid configuration value, using default");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_name_is_surge_sentinel() {
        assert_eq!(APP_NAME, "SurgeSentinel");
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.http_timeout_secs, 10);
        assert_eq!(config.notify_timeout_secs, 10);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SURGE_API_BASE_URL", "http://beds.internal:9000/"),
            ("SURGE_CACHE_TTL_SECS", "15"),
            ("SURGE_HTTP_TIMEOUT_SECS", "3"),
            ("SURGE_NOTIFY_TIMEOUT_SECS", "5"),
            ("SURGE_BIND_ADDR", "0.0.0.0:9090"),
        ]));
        assert_eq!(config.api_base_url, "http://beds.internal:9000/");
        assert_eq!(config.cache_ttl, Duration::from_secs(15));
        assert_eq!(config.http_timeout_secs, 3);
        assert_eq!(config.notify_timeout_secs, 5);
        assert_eq!(config.bind_addr.port(), 9090);
    }

    #[test]
    fn unparseable_values_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SURGE_CACHE_TTL_SECS", "sixty"),
            ("SURGE_BIND_ADDR", "not-an-address"),
            ("SURGE_API_BASE_URL", "   "),
        ]));
        assert_eq!(config.cache_ttl, Duration::from_secs(DEFAULT_CACHE_TTL_SECS));
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn default_log_filter_targets_this_crate() {
        assert!(default_log_filter().contains("surge_sentinel_lib"));
    }
}
