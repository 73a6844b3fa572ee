//! `zone_auth` object endpoints.

use crate::InfobloxClient;
use ibx_core::{Result, ZoneAuth};

const OBJECT_TYPE: &str = "zone_auth";

/// `zone_auth` object endpoints
pub struct ZoneAuthApi<'a> {
    client: &'a InfobloxClient,
}

impl<'a> ZoneAuthApi<'a> {
    pub(crate) fn new(client: &'a InfobloxClient) -> Self {
        Self { client }
    }

    /// List every authoritative zone visible to the user
    pub async fn list(&self) -> Result<Vec<ZoneAuth>> {
        self.client
            .get(OBJECT_TYPE, &[("_return_fields", ZoneAuth::RETURN_FIELDS)])
            .await
    }

    /// Fetch a zone by reference
    pub async fn get(&self, reference: &str) -> Result<ZoneAuth> {
        self.client
            .get(reference, &[("_return_fields", ZoneAuth::RETURN_FIELDS)])
            .await
    }

    /// Create a zone, returning the stored object
    pub async fn create(&self, zone: &ZoneAuth) -> Result<ZoneAuth> {
        self.client
            .post(
                OBJECT_TYPE,
                zone,
                &[("_return_fields", ZoneAuth::RETURN_FIELDS)],
            )
            .await
    }

    /// Delete a zone by reference
    pub async fn delete(&self, reference: &str) -> Result<String> {
        self.client.delete(reference).await
    }
}
