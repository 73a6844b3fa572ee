//! Tenant-scoped operations on top of the raw object endpoints.

use crate::InfobloxClient;
use ibx_core::{
    ExtAttrs, FixedAddress, InfobloxError, Network, Result, ZoneAuth, EA_CLOUD_API_OWNED,
    EA_CMP_TYPE, EA_NETWORK_NAME, EA_TENANT_ID, MAC_ADDR_ZERO,
};
use tracing::{debug, warn};

/// High-level object operations for one tenant
///
/// Every object created through the manager is stamped with the tenant's
/// `Tenant ID`, `CMP Type` and `Cloud API Owned` attributes.
#[derive(Clone)]
pub struct ObjectManager {
    client: InfobloxClient,
    cmp_type: String,
    tenant_id: String,
}

impl ObjectManager {
    /// Create a manager for `tenant_id`, tagging objects with `cmp_type`
    #[must_use]
    pub fn new(
        client: InfobloxClient,
        cmp_type: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            cmp_type: cmp_type.into(),
            tenant_id: tenant_id.into(),
        }
    }

    /// Tenant this manager acts for
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// The scoping attributes stamped on created objects
    #[must_use]
    pub fn basic_ea(&self, cloud_api_owned: bool) -> ExtAttrs {
        ExtAttrs::new()
            .with(EA_CLOUD_API_OWNED, cloud_api_owned)
            .with(EA_CMP_TYPE, self.cmp_type.as_str())
            .with(EA_TENANT_ID, self.tenant_id.as_str())
    }

    fn extend_ea(&self, extra: &ExtAttrs) -> ExtAttrs {
        let mut ea = self.basic_ea(true);
        ea.extend(extra);
        ea
    }

    /// Allocate the next free `prefix_len` block below `parent_cidr`
    pub async fn allocate_network(
        &self,
        view: &str,
        parent_cidr: &str,
        prefix_len: u32,
        name: Option<&str>,
    ) -> Result<Network> {
        let mut ea = self.basic_ea(true);
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            ea.insert(EA_NETWORK_NAME, name);
        }

        let request = Network {
            network_view: view.to_string(),
            cidr: Network::next_available(parent_cidr, view, prefix_len),
            ea,
            ..Network::default()
        };

        let mut network = self.client.networks().create(&request).await?;

        // Some grid versions echo the request; the reference always holds the block
        if network.cidr.is_empty() || network.cidr.starts_with("func:") {
            let parsed = Network::from_ref(&network.reference)
                .ok_or_else(|| InfobloxError::InvalidReference(network.reference.clone()))?;
            network.cidr = parsed.cidr;
            network.network_view = parsed.network_view;
        }

        debug!(cidr = %network.cidr, view, "allocated network");
        Ok(network)
    }

    /// Find a fixed address in `cidr`, filtered by address and MAC when given
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn get_fixed_address(
        &self,
        view: &str,
        cidr: &str,
        ip: Option<&str>,
        mac: Option<&str>,
    ) -> Result<Option<FixedAddress>> {
        let found = self
            .client
            .fixed_addresses()
            .search(view, cidr)
            .ip(ip)
            .mac(mac)
            .send()
            .await?;

        Ok(found.into_iter().next())
    }

    /// Create a fixed address in `cidr`
    ///
    /// Without an address the next free one is taken; without a MAC the zero
    /// MAC is registered.
    pub async fn allocate_ip(
        &self,
        view: &str,
        cidr: &str,
        ip: Option<&str>,
        mac: Option<&str>,
        name: Option<&str>,
        ea: &ExtAttrs,
    ) -> Result<FixedAddress> {
        let ip_address = ip
            .filter(|s| !s.is_empty())
            .map_or_else(|| FixedAddress::next_available(cidr, view), String::from);
        let mac = mac.filter(|s| !s.is_empty()).unwrap_or(MAC_ADDR_ZERO);

        let request = FixedAddress {
            network_view: view.to_string(),
            cidr: cidr.to_string(),
            ip_address,
            mac: mac.to_string(),
            name: name.filter(|n| !n.is_empty()).map(String::from),
            ea: self.extend_ea(ea),
            ..FixedAddress::default()
        };

        let mut address = self.client.fixed_addresses().create(&request).await?;

        if address.ip_address.is_empty() || address.is_pending() {
            address.ip_address = FixedAddress::ip_from_ref(&address.reference)
                .ok_or_else(|| InfobloxError::InvalidReference(address.reference.clone()))?
                .to_string();
        }

        debug!(ip = %address.ip_address, cidr, "allocated fixed address");
        Ok(address)
    }

    /// Delete a network, but only if its reference belongs to `view`
    ///
    /// Returns the deleted reference, or `None` when the reference names a
    /// different view (or is not a network reference) and nothing was sent.
    pub async fn delete_network(&self, reference: &str, view: &str) -> Result<Option<String>> {
        match Network::from_ref(reference) {
            Some(network) if network.network_view == view => {
                self.client.networks().delete(reference).await.map(Some)
            }
            _ => {
                warn!(reference, view, "network reference outside view, not deleting");
                Ok(None)
            }
        }
    }

    /// Fetch a network by reference
    pub async fn get_network_by_ref(&self, reference: &str) -> Result<Network> {
        self.client.networks().get(reference).await
    }

    /// Fetch the network with `cidr` in `view`
    pub async fn get_network(&self, view: &str, cidr: &str, ea: &ExtAttrs) -> Result<Network> {
        self.client
            .networks()
            .search(view, cidr, ea)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| InfobloxError::NotFound {
                resource: format!("network {cidr} in view {view}"),
            })
    }

    /// List every authoritative zone
    pub async fn list_zones(&self) -> Result<Vec<ZoneAuth>> {
        self.client.zones().list().await
    }

    /// Create an authoritative zone
    pub async fn create_zone(&self, fqdn: &str, view: &str, ea: &ExtAttrs) -> Result<ZoneAuth> {
        let request = ZoneAuth {
            fqdn: fqdn.to_string(),
            view: view.to_string(),
            ea: self.extend_ea(ea),
            ..ZoneAuth::default()
        };

        self.client.zones().create(&request).await
    }

    /// Fetch an authoritative zone by reference
    pub async fn get_zone_by_ref(&self, reference: &str) -> Result<ZoneAuth> {
        self.client.zones().get(reference).await
    }

    /// Delete an authoritative zone by reference
    pub async fn delete_zone(&self, reference: &str) -> Result<String> {
        self.client.zones().delete(reference).await
    }
}
