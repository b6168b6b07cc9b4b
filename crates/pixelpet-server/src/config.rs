//! Server configuration from environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Secret used when `PIXELPET_JWT_SECRET` is unset. Fine for local play,
/// warned about at startup.
pub const DEV_JWT_SECRET: &str = "pixelpet-dev-secret";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Root of the per-user record store.
    pub data_dir: PathBuf,
    /// HS256 signing key for bearer tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
    /// Period of the decay ticker.
    pub decay_interval: Duration,
    /// Directory of static client files served as a fallback, if any.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            jwt_secret: DEV_JWT_SECRET.into(),
            token_ttl: Duration::from_secs(24 * 60 * 60),
            decay_interval: Duration::from_secs(5 * 60),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PIXELPET_PORT").or_else(|| get("PORT")) {
            Some(v) => parse_number("PIXELPET_PORT", &v)?,
            None => defaults.port,
        };
        let token_ttl = match get("PIXELPET_TOKEN_TTL_SECS") {
            Some(v) => Duration::from_secs(nonzero("PIXELPET_TOKEN_TTL_SECS", &v)?),
            None => defaults.token_ttl,
        };
        let decay_interval = match get("PIXELPET_DECAY_INTERVAL_SECS") {
            Some(v) => Duration::from_secs(nonzero("PIXELPET_DECAY_INTERVAL_SECS", &v)?),
            None => defaults.decay_interval,
        };

        Ok(Self {
            host: get("PIXELPET_HOST").unwrap_or(defaults.host),
            port,
            data_dir: get("PIXELPET_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            jwt_secret: get("PIXELPET_JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl,
            decay_interval,
            static_dir: get("PIXELPET_STATIC_DIR").map(PathBuf::from),
        })
    }

    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        var,
        value: value.to_string(),
    })
}

fn nonzero(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match parse_number(var, value)? {
        0 => Err(ConfigError::Zero(var)),
        n => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.decay_interval, Duration::from_secs(300));
        assert_eq!(config.token_ttl, Duration::from_secs(86400));
        assert!(config.static_dir.is_none());
        assert!(config.uses_dev_secret());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("PIXELPET_HOST", "127.0.0.1"),
            ("PIXELPET_PORT", "8080"),
            ("PIXELPET_DATA_DIR", "/var/lib/pixelpet"),
            ("PIXELPET_JWT_SECRET", "hunter2"),
            ("PIXELPET_DECAY_INTERVAL_SECS", "10"),
            ("PIXELPET_STATIC_DIR", "public"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/pixelpet"));
        assert_eq!(config.decay_interval, Duration::from_secs(10));
        assert_eq!(config.static_dir, Some(PathBuf::from("public")));
        assert!(!config.uses_dev_secret());
    }

    #[test]
    fn test_plain_port_fallback() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "4000")])).unwrap();
        assert_eq!(config.port, 4000);
        let config =
            ServerConfig::from_lookup(lookup(&[("PORT", "4000"), ("PIXELPET_PORT", "5000")]))
                .unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_bad_numbers_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("PIXELPET_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::NotANumber { .. }));
        let err = ServerConfig::from_lookup(lookup(&[("PIXELPET_DECAY_INTERVAL_SECS", "0")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Zero("PIXELPET_DECAY_INTERVAL_SECS"));
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("PIXELPET_HOST", "  ")])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
    }
}
