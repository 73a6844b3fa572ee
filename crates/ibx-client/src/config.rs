//! Connection settings for a grid master.

use ibx_core::{InfobloxError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default HTTPS port of the grid master
pub const DEFAULT_PORT: u16 = 443;

/// WAPI version spoken by default
pub const DEFAULT_WAPI_VERSION: &str = "2.5";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of idle connections kept per host
pub const DEFAULT_POOL_CONNECTIONS: usize = 10;

/// How to reach and authenticate against a grid master
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectorConfig {
    /// Grid master host name or address
    pub host: String,

    /// HTTPS port
    #[serde(default = "default_port")]
    pub port: u16,

    /// WAPI version, e.g. `2.5`
    #[serde(default = "default_wapi_version")]
    pub wapi_version: String,

    /// WAPI user
    pub username: String,

    /// WAPI password
    #[serde(default)]
    pub password: String,

    /// Verify the server certificate
    #[serde(default = "default_true")]
    pub ssl_verify: bool,

    /// Request timeout
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Idle connections kept per host
    #[serde(default = "default_pool_connections")]
    pub pool_connections: usize,
}

impl ConnectorConfig {
    /// Create a configuration with default port, version and transport settings
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            wapi_version: DEFAULT_WAPI_VERSION.to_string(),
            username: username.into(),
            password: password.into(),
            ssl_verify: true,
            timeout: DEFAULT_TIMEOUT,
            pool_connections: DEFAULT_POOL_CONNECTIONS,
        }
    }

    /// Set the HTTPS port
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the WAPI version
    #[must_use]
    pub fn wapi_version(mut self, version: impl Into<String>) -> Self {
        self.wapi_version = version.into();
        self
    }

    /// Enable or disable certificate verification
    #[must_use]
    pub const fn ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = verify;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection pool size
    #[must_use]
    pub const fn pool_connections(mut self, n: usize) -> Self {
        self.pool_connections = n;
        self
    }

    /// WAPI base URL, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> String {
        format!(
            "https://{}:{}/wapi/v{}",
            self.host, self.port, self.wapi_version
        )
    }

    /// Check that the settings can produce a working client
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(InfobloxError::Config("grid master host is not set".into()));
        }
        if self.username.trim().is_empty() {
            return Err(InfobloxError::Config("WAPI username is not set".into()));
        }
        if self.wapi_version.trim().is_empty() {
            return Err(InfobloxError::Config("WAPI version is not set".into()));
        }
        if self.timeout.is_zero() {
            return Err(InfobloxError::Config("timeout must be positive".into()));
        }
        Ok(())
    }
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_wapi_version() -> String {
    DEFAULT_WAPI_VERSION.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

const fn default_pool_connections() -> usize {
    DEFAULT_POOL_CONNECTIONS
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConnectorConfig::new("gm.example.com", "admin", "secret");
        assert_eq!(config.port, 443);
        assert_eq!(config.wapi_version, "2.5");
        assert!(config.ssl_verify);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.base_url(), "https://gm.example.com:443/wapi/v2.5");
    }

    #[test]
    fn test_validate() {
        assert!(ConnectorConfig::new("gm", "admin", "").validate().is_ok());
        assert!(ConnectorConfig::new("", "admin", "x").validate().is_err());
        assert!(ConnectorConfig::new("gm", " ", "x").validate().is_err());
        assert!(ConnectorConfig::new("gm", "admin", "x")
            .timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: ConnectorConfig =
            serde_json::from_str(r#"{"host":"gm","username":"admin","timeout":5}"#).unwrap();
        assert_eq!(config.port, 443);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.pool_connections, 10);
    }
}
