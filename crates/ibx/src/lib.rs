//! Infoblox network allocation and authoritative zone provisioning.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ibx::{ConnectorConfig, InfobloxClient};
//! use ibx::provision::allocation::{self, NetworkAllocationConfig};
//! use ibx::provision::zone::{self, ZoneAuthConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConnectorConfig::new("gm.example.com", "admin", "secret");
//!     let client = InfobloxClient::new(config)?;
//!     let objects = client.object_manager("ibx", "acme");
//!
//!     // Carve a /24 out of 10.0.0.0/8 with a gateway and two reserved addresses
//!     let config = NetworkAllocationConfig::new("10.0.0.0/8", "24", "acme").reserve_ip(2);
//!     let network = allocation::create(&objects, &config).await?;
//!     println!("gateway: {:?}", network.gateway_ip);
//!
//!     // Authoritative zone
//!     let zone = zone::create(&objects, &ZoneAuthConfig::new("example.com", "acme")).await?;
//!     println!("zone: {:?}", zone.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/ibx/0.1.0")]

// Re-export core types
pub use ibx_core::*;

// Re-export client
pub use ibx_client::{ConnectorConfig, InfobloxClient, InfobloxClientBuilder, ObjectManager};

// Re-export workflows
pub use ibx_provision as provision;
pub use ibx_provision::{ObjectGateway, ProvisionError, SubdomainMatch};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
