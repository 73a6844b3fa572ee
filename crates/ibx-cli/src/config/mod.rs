//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use ibx::{ConnectorConfig, SubdomainMatch};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::output::OutputFormat;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "IBX_CONFIG";

/// CMP type stamped on objects when none is configured.
pub const DEFAULT_CMP_TYPE: &str = "ibx";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Grid master host.
    pub host: Option<String>,

    /// HTTPS port.
    pub port: Option<u16>,

    /// WAPI version (e.g., 2.5).
    pub wapi_version: Option<String>,

    /// WAPI user name.
    pub username: Option<String>,

    /// WAPI password.
    pub password: Option<String>,

    /// Verify the grid's TLS certificate.
    pub ssl_verify: Option<bool>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// Default tenant.
    pub tenant_id: Option<String>,

    /// CMP type extensible attribute.
    pub cmp_type: Option<String>,

    /// Rule for the zone delete sub-domain guard.
    #[serde(default)]
    pub subdomain_match: SubdomainMatch,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("io", "ibx", "ibx")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Set `key` from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "host" => self.host = Some(value.to_string()),
            "port" => self.port = Some(value.parse()?),
            "wapi_version" => self.wapi_version = Some(value.to_string()),
            "username" => self.username = Some(value.to_string()),
            "password" => self.password = Some(value.to_string()),
            "ssl_verify" => self.ssl_verify = Some(value.parse()?),
            "timeout" | "timeout_secs" => self.timeout_secs = Some(value.parse()?),
            "tenant_id" => self.tenant_id = Some(value.to_string()),
            "cmp_type" => self.cmp_type = Some(value.to_string()),
            "subdomain_match" => {
                self.subdomain_match = match value {
                    "substring" => SubdomainMatch::Substring,
                    "label-suffix" | "label_suffix" => SubdomainMatch::LabelSuffix,
                    _ => anyhow::bail!(
                        "Unknown sub-domain rule: {value}\n\
                         Valid rules: substring, label-suffix"
                    ),
                };
            }
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            _ => anyhow::bail!(
                "Unknown config key: {key}\n\n\
                 Available keys:\n  \
                 host             - Grid master host\n  \
                 port             - HTTPS port (default 443)\n  \
                 wapi_version     - WAPI version (default 2.5)\n  \
                 username         - WAPI user name\n  \
                 password         - WAPI password\n  \
                 ssl_verify       - Verify TLS certificates (true/false)\n  \
                 timeout          - Request timeout in seconds\n  \
                 tenant_id        - Default tenant\n  \
                 cmp_type         - CMP type attribute (default ibx)\n  \
                 subdomain_match  - Zone delete guard (substring/label-suffix)\n  \
                 output_format    - Default output format (pretty/json/yaml)"
            ),
        }

        Ok(())
    }

    /// Connector settings, with command-line values taking precedence.
    pub fn connector(
        &self,
        host: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<ConnectorConfig> {
        let host = host.or_else(|| self.host.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "Grid host required.\n\n\
                 Set it with one of:\n  \
                 1. --host <HOST>\n  \
                 2. IBX_HOST environment variable\n  \
                 3. ibx config set host <HOST>"
            )
        })?;
        let username = username.or_else(|| self.username.clone()).unwrap_or_default();
        let password = password.or_else(|| self.password.clone()).unwrap_or_default();

        let mut config = ConnectorConfig::new(host, username, password);
        if let Some(port) = self.port {
            config = config.port(port);
        }
        if let Some(version) = &self.wapi_version {
            config = config.wapi_version(version);
        }
        if let Some(verify) = self.ssl_verify {
            config = config.ssl_verify(verify);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Configured CMP type, or the default.
    pub fn cmp_type(&self) -> &str {
        self.cmp_type.as_deref().unwrap_or(DEFAULT_CMP_TYPE)
    }

    /// Copy with the password masked for display.
    #[must_use]
    pub fn masked(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| "****".to_string()),
            ..self.clone()
        }
    }
}
