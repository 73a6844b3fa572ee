//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use crate::output::OutputFormat;

/// Command-line interface for Infoblox provisioning
///
/// Allocate networks with a gateway and reserved addresses, look networks up,
/// and manage authoritative zones.
///
/// Connection settings come from flags, IBX_* environment variables or the
/// config file (see `ibx config path`).
#[derive(Parser, Debug)]
#[command(name = "ibx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Grid master host name or address
    #[arg(long, env = "IBX_HOST", global = true)]
    pub host: Option<String>,

    /// WAPI user name
    #[arg(short = 'u', long, env = "IBX_USERNAME", global = true)]
    pub username: Option<String>,

    /// WAPI password
    #[arg(short = 'p', long, env = "IBX_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Tenant the objects belong to
    #[arg(short = 't', long, env = "IBX_TENANT_ID", global = true)]
    pub tenant_id: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Allocate, read and delete networks
    Network(NetworkArgs),

    /// Manage authoritative DNS zones
    Zone(ZoneArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Network command
// ============================================================================

#[derive(Args, Debug)]
pub struct NetworkArgs {
    #[command(subcommand)]
    pub command: NetworkCommands,
}

#[derive(Subcommand, Debug)]
pub enum NetworkCommands {
    /// Allocate a child network with a gateway and reserved addresses
    Allocate {
        /// Parent block to allocate from (e.g., 10.0.0.0/8)
        #[arg(long)]
        cidr: String,

        /// Prefix length of the new block (e.g., 24)
        #[arg(long)]
        prefix_length: String,

        /// Network view
        #[arg(long, default_value = "default")]
        view: String,

        /// Name of the new block
        #[arg(long)]
        name: Option<String>,

        /// Gateway address; the first free address when omitted
        #[arg(long)]
        gateway: Option<String>,

        /// Extra addresses to reserve after the gateway
        #[arg(long, default_value = "0")]
        reserve: u32,
    },

    /// Read an allocated network by reference
    Show {
        /// Network reference
        reference: String,

        /// Network view
        #[arg(long, default_value = "default")]
        view: String,
    },

    /// Delete an allocated network
    Delete {
        /// Network reference
        reference: String,

        /// Network view; nothing is deleted if the reference is in another view
        #[arg(long, default_value = "default")]
        view: String,
    },

    /// Change an allocated network (not supported)
    Update {
        /// Network reference
        reference: String,
    },

    /// Find a network by CIDR
    Lookup {
        /// Block in CIDR notation
        #[arg(long)]
        cidr: String,

        /// Network view; any view when omitted
        #[arg(long, default_value = "")]
        view: String,
    },
}

// ============================================================================
// Zone command
// ============================================================================

#[derive(Args, Debug)]
pub struct ZoneArgs {
    #[command(subcommand)]
    pub command: ZoneCommands,
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommands {
    /// Create an authoritative zone
    Create {
        /// Zone name (e.g., example.com)
        fqdn: String,

        /// DNS view
        #[arg(long, default_value = "default")]
        dns_view: String,
    },

    /// Read a zone by reference
    Show {
        /// Zone reference
        reference: String,

        /// Zone name
        #[arg(long)]
        fqdn: String,
    },

    /// Delete a zone unless another zone is a sub-domain of it
    Delete {
        /// Zone reference
        reference: String,

        /// Zone name, checked against every zone on the grid
        #[arg(long)]
        fqdn: String,
    },

    /// Change a zone (not supported)
    Update {
        /// Zone reference
        reference: String,
    },

    /// List all authoritative zones
    List,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., host, tenant_id, output_format)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
