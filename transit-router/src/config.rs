//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::export::DEFAULT_CODED_NAME_PATTERN;

/// Error reading server configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path of the JSON dataset to serve (`TRANSIT_DATA`).
    pub data_path: PathBuf,

    /// Address to listen on (`TRANSIT_BIND`).
    pub bind: SocketAddr,

    /// Provider cache settings (`TRANSIT_CACHE_TTL_SECS`).
    pub cache: CacheConfig,

    /// Upper bound on a single path search (`TRANSIT_PATH_TIMEOUT_MS`).
    pub path_timeout: Duration,

    /// Regex matching placeholder station names (`TRANSIT_CODED_NAME_PATTERN`).
    pub coded_name_pattern: String,
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    ///
    /// Unset variables keep their default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("TRANSIT_DATA") {
            config.data_path = PathBuf::from(path);
        }
        if let Some(bind) = lookup("TRANSIT_BIND") {
            config.bind = parse("TRANSIT_BIND", bind)?;
        }
        if let Some(secs) = lookup("TRANSIT_CACHE_TTL_SECS") {
            let ttl = Duration::from_secs(parse("TRANSIT_CACHE_TTL_SECS", secs)?);
            config.cache = CacheConfig::new(ttl, config.cache.max_capacity);
        }
        if let Some(ms) = lookup("TRANSIT_PATH_TIMEOUT_MS") {
            let ms: u64 = parse("TRANSIT_PATH_TIMEOUT_MS", ms)?;
            if ms == 0 {
                return Err(ConfigError::Invalid {
                    name: "TRANSIT_PATH_TIMEOUT_MS",
                    value: "0".to_string(),
                });
            }
            config.path_timeout = Duration::from_millis(ms);
        }
        if let Some(pattern) = lookup("TRANSIT_CODED_NAME_PATTERN") {
            if regex::Regex::new(&pattern).is_err() {
                return Err(ConfigError::Invalid {
                    name: "TRANSIT_CODED_NAME_PATTERN",
                    value: pattern,
                });
            }
            config.coded_name_pattern = pattern;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/network.json"),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cache: CacheConfig::default(),
            path_timeout: Duration::from_secs(5),
            coded_name_pattern: DEFAULT_CODED_NAME_PATTERN.to_string(),
        }
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.data_path, PathBuf::from("data/network.json"));
        assert_eq!(config.bind, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.cache.ttl, Duration::from_secs(60));
        assert_eq!(config.path_timeout, Duration::from_secs(5));
        assert_eq!(config.coded_name_pattern, DEFAULT_CODED_NAME_PATTERN);
    }

    #[test]
    fn reads_every_variable() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRANSIT_DATA", "/srv/bangkok.json"),
            ("TRANSIT_BIND", "0.0.0.0:8080"),
            ("TRANSIT_CACHE_TTL_SECS", "5"),
            ("TRANSIT_PATH_TIMEOUT_MS", "250"),
            ("TRANSIT_CODED_NAME_PATTERN", r"^X\d+$"),
        ]))
        .unwrap();

        assert_eq!(config.data_path, PathBuf::from("/srv/bangkok.json"));
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.cache.ttl, Duration::from_secs(5));
        assert_eq!(config.cache.max_capacity, 1000);
        assert_eq!(config.path_timeout, Duration::from_millis(250));
        assert_eq!(config.coded_name_pattern, r"^X\d+$");
    }

    #[test]
    fn rejects_bad_bind_address() {
        let vars = lookup(&[("TRANSIT_BIND", "localhost")]);
        let err = ServerConfig::from_lookup(vars).unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "TRANSIT_BIND",
                value: "localhost".to_string()
            }
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        let vars = lookup(&[("TRANSIT_PATH_TIMEOUT_MS", "0")]);
        let err = ServerConfig::from_lookup(vars).unwrap_err();
        assert!(err.to_string().contains("TRANSIT_PATH_TIMEOUT_MS"));
    }

    #[test]
    fn rejects_invalid_pattern() {
        let vars = lookup(&[("TRANSIT_CODED_NAME_PATTERN", "[A-")]);
        let err = ServerConfig::from_lookup(vars).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "TRANSIT_CODED_NAME_PATTERN",
                ..
            }
        ));
    }
}
