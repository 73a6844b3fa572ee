//! # ibx-cli
//!
//! Command-line interface for Infoblox network allocation and auth zones.
//!
//! ## Features
//!
//! - **Network allocation**: carve a child block, create its gateway, reserve addresses
//! - **Network lookup**: find a block by view and CIDR
//! - **Auth zones**: create, read, list and guarded delete
//! - **Multiple output formats**: Pretty, JSON, YAML

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
