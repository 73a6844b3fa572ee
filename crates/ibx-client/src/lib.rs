//! HTTP client for the Infoblox WAPI.
//!
//! This crate provides [`InfobloxClient`] for raw per-object access and
//! [`ObjectManager`] for the tenant-scoped operations the provisioning
//! workflows are built on.

#![doc(html_root_url = "https://docs.rs/ibx-client/0.1.0")]

mod client;
mod config;
mod object_manager;
pub mod api;

pub use client::{InfobloxClient, InfobloxClientBuilder};
pub use config::*;
pub use ibx_core::{InfobloxError, Result};
pub use object_manager::ObjectManager;
