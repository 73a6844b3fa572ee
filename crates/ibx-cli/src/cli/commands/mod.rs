//! Command implementations.

pub mod config;
pub mod network;
pub mod zone;

use ibx::{InfobloxClient, ObjectManager};

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Grid host from the command line or environment
    pub host: Option<String>,

    /// WAPI user name from the command line or environment
    pub username: Option<String>,

    /// WAPI password from the command line or environment
    pub password: Option<String>,

    /// Tenant the objects belong to
    pub tenant_id: String,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,

    /// Loaded config file
    pub config: Config,
}

impl Context {
    /// Create a tenant-scoped object manager from the resolved settings.
    pub fn objects(&self) -> anyhow::Result<ObjectManager> {
        let connector = self.config.connector(
            self.host.clone(),
            self.username.clone(),
            self.password.clone(),
        )?;

        tracing::debug!(url = %connector.base_url(), tenant = %self.tenant_id, "connecting");

        let client = InfobloxClient::new(connector)?;
        Ok(client.object_manager(self.config.cmp_type(), self.tenant_id.clone()))
    }
}
