//! `fixedaddress` object endpoints.

use crate::InfobloxClient;
use ibx_core::{FixedAddress, Result};

const OBJECT_TYPE: &str = "fixedaddress";

/// `fixedaddress` object endpoints
pub struct FixedAddressApi<'a> {
    client: &'a InfobloxClient,
}

impl<'a> FixedAddressApi<'a> {
    pub(crate) fn new(client: &'a InfobloxClient) -> Self {
        Self { client }
    }

    /// Search fixed addresses inside a network block
    #[must_use]
    pub fn search(
        &self,
        view: impl Into<String>,
        cidr: impl Into<String>,
    ) -> FixedAddressSearchBuilder<'a> {
        FixedAddressSearchBuilder::new(self.client, view.into(), cidr.into())
    }

    /// Fetch a fixed address by reference
    pub async fn get(&self, reference: &str) -> Result<FixedAddress> {
        self.client
            .get(reference, &[("_return_fields", FixedAddress::RETURN_FIELDS)])
            .await
    }

    /// Create a fixed address, returning the stored object
    pub async fn create(&self, address: &FixedAddress) -> Result<FixedAddress> {
        self.client
            .post(
                OBJECT_TYPE,
                address,
                &[("_return_fields", FixedAddress::RETURN_FIELDS)],
            )
            .await
    }

    /// Delete a fixed address by reference
    pub async fn delete(&self, reference: &str) -> Result<String> {
        self.client.delete(reference).await
    }
}

/// Builder for fixed address searches
///
/// Unset filters are left out of the query entirely.
pub struct FixedAddressSearchBuilder<'a> {
    client: &'a InfobloxClient,
    view: String,
    cidr: String,
    ip: Option<String>,
    mac: Option<String>,
}

impl<'a> FixedAddressSearchBuilder<'a> {
    fn new(client: &'a InfobloxClient, view: String, cidr: String) -> Self {
        Self {
            client,
            view,
            cidr,
            ip: None,
            mac: None,
        }
    }

    /// Match a specific address
    #[must_use]
    pub fn ip(mut self, ip: Option<&str>) -> Self {
        self.ip = ip.filter(|s| !s.is_empty()).map(String::from);
        self
    }

    /// Match a specific hardware address
    #[must_use]
    pub fn mac(mut self, mac: Option<&str>) -> Self {
        self.mac = mac.filter(|s| !s.is_empty()).map(String::from);
        self
    }

    /// Execute the search
    pub async fn send(self) -> Result<Vec<FixedAddress>> {
        let mut params: Vec<(&str, &str)> =
            vec![("_return_fields", FixedAddress::RETURN_FIELDS)];

        if !self.view.is_empty() {
            params.push(("network_view", self.view.as_str()));
        }
        if !self.cidr.is_empty() {
            params.push(("network", self.cidr.as_str()));
        }
        if let Some(ref ip) = self.ip {
            params.push(("ipv4addr", ip.as_str()));
        }
        if let Some(ref mac) = self.mac {
            params.push(("mac", mac.as_str()));
        }

        self.client.get(OBJECT_TYPE, &params).await
    }
}
