//! Read-only network lookup.

use crate::{ObjectGateway, ProvisionError, Result};
use ibx_core::ExtAttrs;
use serde::{Deserialize, Serialize};

/// Which network to look up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkLookup {
    /// Network view; empty matches any view
    #[serde(default)]
    pub network_view_name: String,

    /// Block in CIDR notation
    pub cidr: String,

    /// Tenant asking
    pub tenant_id: String,
}

/// A network as found on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkRecord {
    /// Network reference
    pub id: String,
    /// View the network lives in
    pub network_view_name: String,
    /// Block in CIDR notation
    pub cidr: String,
    /// Tenant that asked, echoed back
    pub tenant_id: String,
}

/// Look up a network by view and CIDR
pub async fn read<G>(gateway: &G, query: &NetworkLookup) -> Result<NetworkRecord>
where
    G: ObjectGateway + ?Sized,
{
    let network = gateway
        .get_network(&query.network_view_name, &query.cidr, &ExtAttrs::new())
        .await
        .map_err(|source| ProvisionError::NetworkRead {
            view: query.network_view_name.clone(),
            source,
        })?;

    Ok(NetworkRecord {
        id: network.reference,
        network_view_name: network.network_view,
        cidr: network.cidr,
        tenant_id: query.tenant_id.clone(),
    })
}
