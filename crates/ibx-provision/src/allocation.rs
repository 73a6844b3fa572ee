//! Network allocation: carve a child block, guarantee its gateway, reserve addresses.
//!
//! The workflow is linear and best-effort. Each step waits for its remote call
//! and the first failure ends the run; blocks and addresses created by earlier
//! steps are left in place for the caller to retry or clean up.

use crate::{resource_label, ObjectGateway, ProvisionError, Result};
use ibx_core::{ExtAttrs, FixedAddress, Network, DEFAULT_VIEW, MAC_ADDR_ZERO};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const RESOURCE: &str = "ibx_ip_allocation";

/// Caller-supplied settings for a network allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAllocationConfig {
    /// Network view to allocate in
    #[serde(default = "default_view")]
    pub network_view_name: String,

    /// Name of the new block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,

    /// Parent block to allocate from
    pub cidr: String,

    /// Tenant the block belongs to
    pub tenant_id: String,

    /// Extra addresses to reserve after the gateway
    #[serde(default)]
    pub reserve_ip: u32,

    /// Requested gateway address; the first free address when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// Prefix length of the child block, as entered
    pub prefix_length: String,
}

fn default_view() -> String {
    DEFAULT_VIEW.to_string()
}

impl NetworkAllocationConfig {
    /// Allocate a `/prefix_length` child of `cidr` in the default view
    #[must_use]
    pub fn new(
        cidr: impl Into<String>,
        prefix_length: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            network_view_name: default_view(),
            network_name: None,
            cidr: cidr.into(),
            tenant_id: tenant_id.into(),
            reserve_ip: 0,
            gateway: None,
            prefix_length: prefix_length.into(),
        }
    }

    /// Set the network view
    #[must_use]
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.network_view_name = view.into();
        self
    }

    /// Name the new block
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.network_name = Some(name.into());
        self
    }

    /// Request a specific gateway address
    #[must_use]
    pub fn gateway(mut self, ip: impl Into<String>) -> Self {
        self.gateway = Some(ip.into());
        self
    }

    /// Reserve `n` extra addresses
    #[must_use]
    pub const fn reserve_ip(mut self, n: u32) -> Self {
        self.reserve_ip = n;
        self
    }

    /// Parse the prefix length
    pub fn prefix_len(&self) -> Result<u32> {
        self.prefix_length
            .trim()
            .parse()
            .map_err(|source| ProvisionError::InvalidPrefixLength {
                value: self.prefix_length.clone(),
                source,
            })
    }

    /// Validated workflow input
    pub fn request(&self) -> Result<AllocationRequest> {
        let prefix_len = self.prefix_len()?;
        if self.tenant_id.trim().is_empty() {
            return Err(ProvisionError::MissingTenant { resource: RESOURCE });
        }

        Ok(AllocationRequest {
            view: self.network_view_name.clone(),
            parent_cidr: self.cidr.clone(),
            prefix_len,
            name: self.network_name.clone().filter(|n| !n.is_empty()),
            gateway_hint: self.gateway.clone().filter(|g| !g.is_empty()),
            reserve_count: self.reserve_ip,
        })
    }
}

/// Local record of an allocated network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAllocationState {
    /// Network reference; `None` once deleted
    pub id: Option<String>,

    /// Settings the allocation was made with
    #[serde(flatten)]
    pub config: NetworkAllocationConfig,

    /// Block that was carved out, as reported by the grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocated_cidr: Option<String>,

    /// Gateway address of the block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<String>,

    /// Addresses reserved after the gateway
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reserved_ips: Vec<String>,
}

impl NetworkAllocationState {
    /// State for an existing block known only by reference
    #[must_use]
    pub fn existing(reference: impl Into<String>, config: NetworkAllocationConfig) -> Self {
        Self {
            id: Some(reference.into()),
            config,
            allocated_cidr: None,
            gateway_ip: None,
            reserved_ips: Vec::new(),
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

/// Validated input of [`allocate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Network view
    pub view: String,
    /// Parent block
    pub parent_cidr: String,
    /// Prefix length of the child block
    pub prefix_len: u32,
    /// Name of the child block
    pub name: Option<String>,
    /// Requested gateway address
    pub gateway_hint: Option<String>,
    /// Extra addresses to reserve
    pub reserve_count: u32,
}

/// What [`allocate`] created or reused
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// The new block
    pub network: Network,
    /// Gateway address, either found or created
    pub gateway: FixedAddress,
    /// True if the gateway already existed
    pub gateway_reused: bool,
    /// Addresses reserved after the gateway
    pub reserved: Vec<FixedAddress>,
}

/// Allocate a block, ensure its gateway, then reserve `reserve_count` addresses
///
/// Calls issued: one network allocation, one gateway lookup, at most one
/// gateway creation, then exactly `reserve_count` address allocations.
pub async fn allocate<G>(gateway: &G, request: &AllocationRequest) -> Result<Allocation>
where
    G: ObjectGateway + ?Sized,
{
    let view = request.view.as_str();
    let hint = request.gateway_hint.as_deref();
    let no_attrs = ExtAttrs::new();

    let network = gateway
        .allocate_network(
            view,
            &request.parent_cidr,
            request.prefix_len,
            request.name.as_deref(),
        )
        .await
        .map_err(|source| ProvisionError::Allocation {
            view: view.to_string(),
            source,
        })?;
    let cidr = network.cidr.as_str();

    let existing = match gateway.get_fixed_address(view, cidr, hint, None).await {
        Ok(found) => found,
        Err(e) => {
            warn!(error = %e, cidr, "gateway lookup failed, creating one");
            None
        }
    };

    let (gateway_addr, gateway_reused) = match existing {
        Some(addr) => {
            info!(ip = %addr.ip_address, cidr, "gateway already created");
            (addr, true)
        }
        None => {
            let addr = gateway
                .allocate_address(view, cidr, hint, Some(MAC_ADDR_ZERO), None, &no_attrs)
                .await
                .map_err(|source| ProvisionError::GatewayCreation {
                    cidr: cidr.to_string(),
                    source,
                })?;
            (addr, false)
        }
    };

    let mut reserved = Vec::new();
    for _ in 0..request.reserve_count {
        let addr = gateway
            .allocate_address(view, cidr, hint, Some(MAC_ADDR_ZERO), None, &no_attrs)
            .await
            .map_err(|source| {
                warn!(
                    reserved = reserved.len(),
                    "reservation failed, earlier reservations are kept"
                );
                ProvisionError::Reservation {
                    view: view.to_string(),
                    source,
                }
            })?;
        reserved.push(addr);
    }

    Ok(Allocation {
        network,
        gateway: gateway_addr,
        gateway_reused,
        reserved,
    })
}

/// Create a network allocation and read it back
pub async fn create<G>(
    gateway: &G,
    config: &NetworkAllocationConfig,
) -> Result<NetworkAllocationState>
where
    G: ObjectGateway + ?Sized,
{
    debug!("{}: Beginning network block creation", resource_label(RESOURCE, None));

    let request = config.request()?;
    let allocation = allocate(gateway, &request).await?;

    let mut state = NetworkAllocationState {
        id: Some(allocation.network.reference.clone()),
        config: config.clone(),
        allocated_cidr: Some(allocation.network.cidr.clone()),
        gateway_ip: Some(allocation.gateway.ip_address.clone()),
        reserved_ips: allocation
            .reserved
            .into_iter()
            .map(|a| a.ip_address)
            .collect(),
    };

    debug!("{}: Creation of network block complete", state.label());
    read(gateway, &mut state).await?;
    Ok(state)
}

/// Refresh the state from the grid
///
/// Only the reference, the allocated block and the view are taken from the
/// remote object; caller-supplied settings are kept as they are.
pub async fn read<G>(gateway: &G, state: &mut NetworkAllocationState) -> Result<()>
where
    G: ObjectGateway + ?Sized,
{
    debug!("{}: Reading the network block", state.label());

    let reference = state.require_id()?;
    let network = gateway
        .get_network_by_ref(reference)
        .await
        .map_err(|source| ProvisionError::NetworkRead {
            view: state.config.network_view_name.clone(),
            source,
        })?;

    state.id = Some(network.reference);
    if !network.cidr.is_empty() {
        state.allocated_cidr = Some(network.cidr);
    }
    if !network.network_view.is_empty() {
        state.config.network_view_name = network.network_view;
    }

    debug!("{}: Completed reading network block", state.label());
    Ok(())
}

/// Network allocations cannot be changed in place
pub fn update(_state: &NetworkAllocationState, _config: &NetworkAllocationConfig) -> Result<()> {
    Err(ProvisionError::UpdateNotSupported { resource: "network" })
}

/// Delete the allocated block and clear the local reference
///
/// The gateway and reserved addresses go with the block on the grid.
pub async fn delete<G>(gateway: &G, state: &mut NetworkAllocationState) -> Result<()>
where
    G: ObjectGateway + ?Sized,
{
    debug!("{}: Beginning deletion of network block", state.label());

    let view = state.config.network_view_name.clone();
    let reference = state.require_id()?;
    gateway
        .delete_network(reference, &view)
        .await
        .map_err(|source| ProvisionError::NetworkDelete { view, source })?;

    state.id = None;
    debug!("{}: Deletion of network block complete", state.label());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeGateway, Lookup};
    use crate::ErrorKind;
    use tokio_test::{assert_err, assert_ok};

    fn config() -> NetworkAllocationConfig {
        NetworkAllocationConfig::new("10.0.0.0/8", "24", "acme")
    }

    #[tokio::test]
    async fn test_zero_reservations_call_sequence() {
        let gw = FakeGateway::new();
        let state = assert_ok!(create(&gw, &config()).await);

        assert_eq!(
            gw.calls(),
            vec![
                Call::AllocateNetwork,
                Call::GetFixedAddress,
                Call::AllocateAddress,
                Call::GetNetworkByRef,
            ]
        );
        assert_eq!(state.id.as_deref(), Some("network/ZG5z:10.0.0.0/24/default"));
        assert_eq!(state.gateway_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(state.allocated_cidr.as_deref(), Some("10.0.0.0/24"));
    }

    #[tokio::test]
    async fn test_reserves_exactly_n_addresses() {
        for n in [1u32, 3, 7] {
            let gw = FakeGateway::new();
            let state = assert_ok!(create(&gw, &config().reserve_ip(n)).await);

            // one gateway creation plus n reservations
            assert_eq!(gw.count(Call::AllocateAddress), n as usize + 1);
            assert_eq!(state.reserved_ips.len(), n as usize);
        }
    }

    #[tokio::test]
    async fn test_reservations_follow_gateway_resolution() {
        let gw = FakeGateway {
            lookup: Lookup::Found("10.0.0.254".into()),
            ..FakeGateway::new()
        };
        let request = assert_ok!(config().reserve_ip(2).request());
        let allocation = assert_ok!(allocate(&gw, &request).await);

        assert_eq!(
            gw.calls(),
            vec![
                Call::AllocateNetwork,
                Call::GetFixedAddress,
                Call::AllocateAddress,
                Call::AllocateAddress,
            ]
        );
        assert_eq!(allocation.reserved.len(), 2);
    }

    #[tokio::test]
    async fn test_existing_gateway_is_reused() {
        let gw = FakeGateway {
            lookup: Lookup::Found("10.0.0.254".into()),
            ..FakeGateway::new()
        };
        let state = assert_ok!(create(&gw, &config().gateway("10.0.0.254")).await);

        assert_eq!(gw.count(Call::AllocateAddress), 0);
        assert_eq!(state.gateway_ip.as_deref(), Some("10.0.0.254"));
    }

    #[tokio::test]
    async fn test_lookup_error_falls_through_to_create() {
        let gw = FakeGateway {
            lookup: Lookup::Fails,
            ..FakeGateway::new()
        };
        let state = assert_ok!(create(&gw, &config()).await);

        assert_eq!(gw.count(Call::AllocateAddress), 1);
        assert!(state.gateway_ip.is_some());
    }

    #[tokio::test]
    async fn test_gateway_hint_is_reused_for_reservations() {
        let gw = FakeGateway::new();
        let request = assert_ok!(config().gateway("10.0.0.1").reserve_ip(2).request());
        assert_ok!(allocate(&gw, &request).await);

        assert_eq!(gw.address_hints(), vec![Some("10.0.0.1".to_string()); 3]);
    }

    #[tokio::test]
    async fn test_invalid_prefix_makes_no_calls() {
        let gw = FakeGateway::new();
        let err = assert_err!(
            create(&gw, &NetworkAllocationConfig::new("10.0.0.0/8", "twenty", "acme")).await
        );

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn test_allocation_failure_names_view() {
        let gw = FakeGateway {
            fail: Some(Call::AllocateNetwork),
            ..FakeGateway::new()
        };
        let err = assert_err!(create(&gw, &config().view("lab")).await);

        assert!(matches!(err, ProvisionError::Allocation { ref view, .. } if view == "lab"));
        assert_eq!(gw.calls(), vec![Call::AllocateNetwork]);
    }

    #[tokio::test]
    async fn test_gateway_failure_names_block() {
        let gw = FakeGateway {
            fail_address_at: Some(0),
            ..FakeGateway::new()
        };
        let err = assert_err!(create(&gw, &config().reserve_ip(3)).await);

        assert!(err.to_string().contains("network block (10.0.0.0/24)"));
        assert_eq!(gw.count(Call::AllocateAddress), 1);
    }

    #[tokio::test]
    async fn test_partial_reservation_is_not_rolled_back() {
        let gw = FakeGateway {
            fail_address_at: Some(2),
            ..FakeGateway::new()
        };
        let err = assert_err!(create(&gw, &config().reserve_ip(4)).await);

        assert!(matches!(err, ProvisionError::Reservation { .. }));
        // gateway + first reservation succeeded, second failed, nothing deleted
        assert_eq!(gw.count(Call::AllocateAddress), 3);
        assert_eq!(gw.count(Call::DeleteNetwork), 0);
    }

    #[tokio::test]
    async fn test_huge_reserve_count_fails_cleanly() {
        let gw = FakeGateway {
            fail_address_at: Some(2),
            ..FakeGateway::new()
        };
        let err = assert_err!(create(&gw, &config().reserve_ip(u32::MAX)).await);

        assert!(matches!(err, ProvisionError::Reservation { .. }));
        assert_eq!(gw.count(Call::AllocateAddress), 3);
    }

    #[tokio::test]
    async fn test_missing_tenant_makes_no_calls() {
        let gw = FakeGateway::new();
        for tenant in ["", "  "] {
            let config = NetworkAllocationConfig::new("10.0.0.0/8", "24", tenant);
            let err = assert_err!(create(&gw, &config).await);
            assert!(matches!(err, ProvisionError::MissingTenant { .. }));
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert!(gw.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_rejected_without_calls() {
        let gw = FakeGateway::new();
        let state = assert_ok!(create(&gw, &config()).await);
        let before = gw.calls().len();

        let err = assert_err!(update(&state, &config().reserve_ip(5)));
        assert!(err.to_string().contains("not supported"));
        assert_eq!(gw.calls().len(), before);
    }

    #[tokio::test]
    async fn test_read_keeps_caller_fields() {
        let gw = FakeGateway {
            reported_view: Some("reported".into()),
            ..FakeGateway::new()
        };
        let mut state = assert_ok!(create(&gw, &config().reserve_ip(1)).await);
        assert_ok!(read(&gw, &mut state).await);

        assert_eq!(state.config.network_view_name, "reported");
        assert_eq!(state.config.tenant_id, "acme");
        assert_eq!(state.config.cidr, "10.0.0.0/8");
        assert_eq!(state.config.prefix_length, "24");
        assert_eq!(state.config.reserve_ip, 1);
    }

    #[tokio::test]
    async fn test_read_existing_fills_block_from_grid() {
        let gw = FakeGateway::new();
        let mut state =
            NetworkAllocationState::existing("network/ZG5z:10.1.2.0/24/default", config());
        assert_ok!(read(&gw, &mut state).await);

        assert_eq!(state.allocated_cidr.as_deref(), Some("10.1.2.0/24"));
        assert_eq!(state.config.network_view_name, "default");
        assert_eq!(gw.calls(), vec![Call::GetNetworkByRef]);
    }

    #[tokio::test]
    async fn test_delete_clears_id() {
        let gw = FakeGateway::new();
        let mut state = assert_ok!(create(&gw, &config()).await);

        assert_ok!(delete(&gw, &mut state).await);
        assert!(state.id.is_none());
        assert_eq!(gw.calls().last(), Some(&Call::DeleteNetwork));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_id() {
        let gw = FakeGateway::new();
        let mut state = assert_ok!(create(&gw, &config()).await);
        let gw = FakeGateway {
            fail: Some(Call::DeleteNetwork),
            ..FakeGateway::new()
        };

        let err = assert_err!(delete(&gw, &mut state).await);
        assert!(err.to_string().contains("network view (default)"));
        assert!(state.id.is_some());
    }

    #[tokio::test]
    async fn test_delete_without_id() {
        let gw = FakeGateway::new();
        let mut state = NetworkAllocationState {
            id: None,
            config: config(),
            allocated_cidr: None,
            gateway_ip: None,
            reserved_ips: Vec::new(),
        };

        let err = assert_err!(delete(&gw, &mut state).await);
        assert!(matches!(err, ProvisionError::MissingReference { .. }));
        assert!(gw.calls().is_empty());
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: NetworkAllocationConfig = serde_json::from_str(
            r#"{"cidr": "10.0.0.0/8", "tenant_id": "acme", "prefix_length": "24"}"#,
        )
        .unwrap();

        assert_eq!(config.network_view_name, "default");
        assert_eq!(config.reserve_ip, 0);
        assert!(config.gateway.is_none());
    }
}
