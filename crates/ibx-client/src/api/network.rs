//! `network` object endpoints.

use super::ea_search_params;
use crate::InfobloxClient;
use ibx_core::{ExtAttrs, Network, Result};

const OBJECT_TYPE: &str = "network";

/// `network` object endpoints
pub struct NetworkApi<'a> {
    client: &'a InfobloxClient,
}

impl<'a> NetworkApi<'a> {
    pub(crate) fn new(client: &'a InfobloxClient) -> Self {
        Self { client }
    }

    /// Find networks by view and CIDR, optionally filtered by extensible attributes
    pub async fn search(&self, view: &str, cidr: &str, ea: &ExtAttrs) -> Result<Vec<Network>> {
        let ea_params = ea_search_params(ea);

        let mut params: Vec<(&str, &str)> = vec![("_return_fields", Network::RETURN_FIELDS)];
        if !view.is_empty() {
            params.push(("network_view", view));
        }
        if !cidr.is_empty() {
            params.push(("network", cidr));
        }
        params.extend(ea_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        self.client.get(OBJECT_TYPE, &params).await
    }

    /// Fetch a network by reference
    pub async fn get(&self, reference: &str) -> Result<Network> {
        self.client
            .get(reference, &[("_return_fields", Network::RETURN_FIELDS)])
            .await
    }

    /// Create a network, returning the stored object
    ///
    /// `network.cidr` may be a `func:nextavailablenetwork` expression, in
    /// which case the returned object carries the concrete block.
    pub async fn create(&self, network: &Network) -> Result<Network> {
        self.client
            .post(
                OBJECT_TYPE,
                network,
                &[("_return_fields", Network::RETURN_FIELDS)],
            )
            .await
    }

    /// Delete a network by reference
    pub async fn delete(&self, reference: &str) -> Result<String> {
        self.client.delete(reference).await
    }
}
