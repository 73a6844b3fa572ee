//! Provisioning workflows for Infoblox networks and authoritative zones.
//!
//! Each resource kind is handled by plain async functions over an explicit
//! configuration struct and an [`ObjectGateway`]:
//!
//! - [`allocation`] - allocate a child network, guarantee its gateway address
//!   and reserve extra addresses
//! - [`zone`] - authoritative zones, with a guard that refuses to delete a zone
//!   that still has sub-domains
//! - [`lookup`] - read-only network lookup by view and CIDR
//!
//! # Example
//!
//! ```rust,ignore
//! use ibx_client::{ConnectorConfig, InfobloxClient};
//! use ibx_provision::allocation::{self, NetworkAllocationConfig};
//!
//! let client = InfobloxClient::new(ConnectorConfig::new("gm.example.com", "admin", "secret"))?;
//! let gateway = client.object_manager("ibx", "acme");
//!
//! let config = NetworkAllocationConfig::new("10.0.0.0/8", "24", "acme").reserve_ip(2);
//! let state = allocation::create(&gateway, &config).await?;
//! println!("{} via {:?}", state.allocated_cidr.unwrap_or_default(), state.gateway_ip);
//! ```

#![doc(html_root_url = "https://docs.rs/ibx-provision/0.1.0")]

pub mod allocation;
mod error;
mod gateway;
pub mod lookup;
pub mod subdomain;
pub mod zone;

#[cfg(test)]
mod testing;

pub use error::{ErrorKind, ProvisionError, Result};
pub use gateway::ObjectGateway;
pub use subdomain::{has_subdomain, SubdomainMatch};

/// Log label for a resource instance, `<new resource>` until it has an id
pub(crate) fn resource_label(kind: &str, id: Option<&str>) -> String {
    let id = id.filter(|s| !s.is_empty()).unwrap_or("<new resource>");
    format!("{kind} (ID = {id})")
}
