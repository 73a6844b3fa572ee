//! Core types for the Infoblox WAPI.
//!
//! This crate provides the foundational types used across the ibx workspace:
//!
//! - **Types**: WAPI objects ([`Network`], [`FixedAddress`], [`ZoneAuth`]) and
//!   their extensible attributes ([`ExtAttrs`])
//! - **References**: parsing of opaque WAPI object references ([`ObjectRef`])
//! - **Errors**: remote-call failures as [`InfobloxError`]
//!
//! # Example
//!
//! ```rust
//! use ibx_core::Network;
//!
//! let net = Network::from_ref("network/ZG5zLm5ldHdvcmskMTAuMC4wLjAvMjQvMA:10.0.0.0/24/default")
//!     .expect("well-formed reference");
//! assert_eq!(net.cidr, "10.0.0.0/24");
//! assert_eq!(net.network_view, "default");
//! ```

#![doc(html_root_url = "https://docs.rs/ibx-core/0.1.0")]

mod error;
pub mod types;

pub use error::{InfobloxError, Result};
pub use types::*;
