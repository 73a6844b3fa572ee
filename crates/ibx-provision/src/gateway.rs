//! The remote capability set the workflows are written against.

use async_trait::async_trait;
use ibx_client::ObjectManager;
use ibx_core::{ExtAttrs, FixedAddress, Network, Result, ZoneAuth};

/// Remote object operations needed by the provisioning workflows
///
/// [`ObjectManager`] is the production implementation; tests swap in a
/// recording fake.
#[async_trait]
pub trait ObjectGateway: Send + Sync {
    /// Allocate the next free `prefix_len` block below `parent_cidr` in `view`
    async fn allocate_network(
        &self,
        view: &str,
        parent_cidr: &str,
        prefix_len: u32,
        name: Option<&str>,
    ) -> Result<Network>;

    /// Look up a fixed address inside `cidr`; `Ok(None)` when absent
    async fn get_fixed_address(
        &self,
        view: &str,
        cidr: &str,
        ip_hint: Option<&str>,
        mac_hint: Option<&str>,
    ) -> Result<Option<FixedAddress>>;

    /// Allocate a fixed address inside `cidr`
    async fn allocate_address(
        &self,
        view: &str,
        cidr: &str,
        ip_hint: Option<&str>,
        mac: Option<&str>,
        name: Option<&str>,
        attrs: &ExtAttrs,
    ) -> Result<FixedAddress>;

    /// Delete a network by reference within `view`
    async fn delete_network(&self, reference: &str, view: &str) -> Result<()>;

    /// Fetch a network by reference
    async fn get_network_by_ref(&self, reference: &str) -> Result<Network>;

    /// Fetch a network by view and CIDR
    async fn get_network(&self, view: &str, cidr: &str, attrs: &ExtAttrs) -> Result<Network>;

    /// List every authoritative zone
    async fn list_zones(&self) -> Result<Vec<ZoneAuth>>;

    /// Create an authoritative zone
    async fn create_zone(&self, fqdn: &str, view: &str, attrs: &ExtAttrs) -> Result<ZoneAuth>;

    /// Fetch an authoritative zone by reference
    async fn get_zone_by_ref(&self, reference: &str) -> Result<ZoneAuth>;

    /// Delete an authoritative zone by reference
    async fn delete_zone(&self, reference: &str) -> Result<()>;
}

#[async_trait]
impl ObjectGateway for ObjectManager {
    async fn allocate_network(
        &self,
        view: &str,
        parent_cidr: &str,
        prefix_len: u32,
        name: Option<&str>,
    ) -> Result<Network> {
        Self::allocate_network(self, view, parent_cidr, prefix_len, name).await
    }

    async fn get_fixed_address(
        &self,
        view: &str,
        cidr: &str,
        ip_hint: Option<&str>,
        mac_hint: Option<&str>,
    ) -> Result<Option<FixedAddress>> {
        Self::get_fixed_address(self, view, cidr, ip_hint, mac_hint).await
    }

    async fn allocate_address(
        &self,
        view: &str,
        cidr: &str,
        ip_hint: Option<&str>,
        mac: Option<&str>,
        name: Option<&str>,
        attrs: &ExtAttrs,
    ) -> Result<FixedAddress> {
        self.allocate_ip(view, cidr, ip_hint, mac, name, attrs).await
    }

    async fn delete_network(&self, reference: &str, view: &str) -> Result<()> {
        Self::delete_network(self, reference, view).await.map(|_| ())
    }

    async fn get_network_by_ref(&self, reference: &str) -> Result<Network> {
        Self::get_network_by_ref(self, reference).await
    }

    async fn get_network(&self, view: &str, cidr: &str, attrs: &ExtAttrs) -> Result<Network> {
        Self::get_network(self, view, cidr, attrs).await
    }

    async fn list_zones(&self) -> Result<Vec<ZoneAuth>> {
        Self::list_zones(self).await
    }

    async fn create_zone(&self, fqdn: &str, view: &str, attrs: &ExtAttrs) -> Result<ZoneAuth> {
        Self::create_zone(self, fqdn, view, attrs).await
    }

    async fn get_zone_by_ref(&self, reference: &str) -> Result<ZoneAuth> {
        Self::get_zone_by_ref(self, reference).await
    }

    async fn delete_zone(&self, reference: &str) -> Result<()> {
        Self::delete_zone(self, reference).await.map(|_| ())
    }
}
