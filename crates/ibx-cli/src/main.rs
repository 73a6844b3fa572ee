//! ibx - Infoblox provisioning CLI
//!
//! Allocate networks and manage authoritative zones from the command line.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ibx_cli::run().await
}
