//! Authoritative zones, with a sub-domain guard on delete.

use crate::{resource_label, ObjectGateway, ProvisionError, Result, SubdomainMatch};
use ibx_core::{ExtAttrs, DEFAULT_VIEW};
use serde::{Deserialize, Serialize};
use tracing::debug;

const RESOURCE: &str = "ibx_auth_zone";

/// Caller-supplied settings for an auth zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAuthConfig {
    /// Zone name
    pub fqdn: String,

    /// DNS view the zone lives in
    #[serde(default = "default_view")]
    pub dns_view: String,

    /// Tenant the zone belongs to
    pub tenant_id: String,
}

fn default_view() -> String {
    DEFAULT_VIEW.to_string()
}

impl ZoneAuthConfig {
    /// Zone `fqdn` in the default view
    #[must_use]
    pub fn new(fqdn: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            fqdn: fqdn.into(),
            dns_view: default_view(),
            tenant_id: tenant_id.into(),
        }
    }

    /// Set the DNS view
    #[must_use]
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.dns_view = view.into();
        self
    }

    /// Check the settings before anything is sent
    pub fn validate(&self) -> Result<()> {
        if self.tenant_id.trim().is_empty() {
            return Err(ProvisionError::MissingTenant { resource: RESOURCE });
        }
        Ok(())
    }
}

/// Local record of an auth zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAuthState {
    /// Zone reference; `None` once deleted
    pub id: Option<String>,

    /// Zone settings, refreshed from the grid on read
    #[serde(flatten)]
    pub config: ZoneAuthConfig,
}

impl ZoneAuthState {
    /// State for an existing zone known only by reference
    #[must_use]
    pub fn existing(reference: impl Into<String>, config: ZoneAuthConfig) -> Self {
        Self {
            id: Some(reference.into()),
            config,
        }
    }

    fn label(&self) -> String {
        resource_label(RESOURCE, self.id.as_deref())
    }

    fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProvisionError::MissingReference {
                resource: self.label(),
            })
    }
}

/// Create the zone and read it back
pub async fn create<G>(gateway: &G, config: &ZoneAuthConfig) -> Result<ZoneAuthState>
where
    G: ObjectGateway + ?Sized,
{
    debug!("{}: Beginning to create auth zone", resource_label(RESOURCE, None));
    config.validate()?;

    let zone = gateway
        .create_zone(&config.fqdn, &config.dns_view, &ExtAttrs::new())
        .await
        .map_err(|source| ProvisionError::ZoneCreate {
            fqdn: config.fqdn.clone(),
            source,
        })?;

    let mut state = ZoneAuthState::existing(zone.reference, config.clone());
    debug!("{}: Creation of auth zone complete", state.label());

    read(gateway, &mut state).await?;
    Ok(state)
}

/// Refresh the state from the grid
///
/// The reference, name and view come from the remote zone; the tenant id is
/// left as the caller set it.
pub async fn read<G>(gateway: &G, state: &mut ZoneAuthState) -> Result<()>
where
    G: ObjectGateway + ?Sized,
{
    debug!("{}: Beginning to get auth zone", state.label());

    let reference = state.require_id()?;
    let zone = gateway
        .get_zone_by_ref(reference)
        .await
        .map_err(|source| ProvisionError::ZoneRead {
            fqdn: state.config.fqdn.clone(),
            source,
        })?;

    state.id = Some(zone.reference);
    if !zone.fqdn.is_empty() {
        state.config.fqdn = zone.fqdn;
    }
    if !zone.view.is_empty() {
        state.config.dns_view = zone.view;
    }

    debug!("{}: Completed reading auth zone", state.label());
    Ok(())
}

/// Auth zones cannot be changed in place
pub fn update(_state: &ZoneAuthState, _config: &ZoneAuthConfig) -> Result<()> {
    Err(ProvisionError::UpdateNotSupported {
        resource: "auth zone",
    })
}

/// Delete the zone unless another zone is a sub-domain of it
///
/// The full zone list is fetched first; on a conflict the delete call is never
/// issued.
pub async fn delete<G>(gateway: &G, state: &mut ZoneAuthState, rule: SubdomainMatch) -> Result<()>
where
    G: ObjectGateway + ?Sized,
{
    debug!("{}: Beginning deletion of auth zone", state.label());

    let fqdn = state.config.fqdn.clone();
    let reference = state.require_id()?;

    let zones = gateway
        .list_zones()
        .await
        .map_err(|source| ProvisionError::ZoneList { source })?;

    if let Some(sub) = rule.find(&fqdn, zones.iter().map(|z| z.fqdn.as_str())) {
        return Err(ProvisionError::SubdomainConflict {
            fqdn,
            subdomain: sub.to_string(),
        });
    }

    gateway
        .delete_zone(reference)
        .await
        .map_err(|source| ProvisionError::ZoneDelete {
            fqdn: fqdn.clone(),
            source,
        })?;

    state.id = None;
    debug!("{}: Deletion of auth zone {fqdn} complete", state.label());
    Ok(())
}
