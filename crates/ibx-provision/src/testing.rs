//! Recording in-memory gateway for workflow tests.

use crate::ObjectGateway;
use async_trait::async_trait;
use ibx_core::{ExtAttrs, FixedAddress, InfobloxError, Network, ObjectRef, Result, ZoneAuth};
use std::sync::Mutex;

/// Remote operations, in the order the fake saw them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    AllocateNetwork,
    GetFixedAddress,
    AllocateAddress,
    DeleteNetwork,
    GetNetworkByRef,
    GetNetwork,
    ListZones,
    CreateZone,
    GetZoneByRef,
    DeleteZone,
}

/// How the fake answers a fixed address lookup
#[derive(Debug, Clone, Default)]
pub enum Lookup {
    #[default]
    Missing,
    Found(String),
    Fails,
}

#[derive(Default)]
pub struct FakeGateway {
    pub calls: Mutex<Vec<Call>>,
    pub address_hints: Mutex<Vec<Option<String>>>,
    pub zones: Vec<ZoneAuth>,
    pub lookup: Lookup,
    /// Fail every call of this kind
    pub fail: Option<Call>,
    /// Fail the n-th (0-based) `allocate_address` call
    pub fail_address_at: Option<usize>,
    /// View reported back on reads
    pub reported_view: Option<String>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zones(names: &[&str]) -> Self {
        Self {
            zones: names
                .iter()
                .map(|n| ZoneAuth {
                    reference: format!("zone_auth/ZG5z:{n}/default"),
                    fqdn: (*n).to_string(),
                    view: "default".into(),
                    ..ZoneAuth::default()
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    /// IP hints passed to each `allocate_address` call
    pub fn address_hints(&self) -> Vec<Option<String>> {
        self.address_hints.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail == Some(call) {
            return Err(InfobloxError::Api {
                code: 400,
                message: format!("{call:?} rejected"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectGateway for FakeGateway {
    async fn allocate_network(
        &self,
        view: &str,
        _parent_cidr: &str,
        prefix_len: u32,
        _name: Option<&str>,
    ) -> Result<Network> {
        self.record(Call::AllocateNetwork)?;
        let cidr = format!("10.0.0.0/{prefix_len}");
        Ok(Network {
            reference: format!("network/ZG5z:{cidr}/{view}"),
            network_view: view.to_string(),
            cidr,
            ..Network::default()
        })
    }

    async fn get_fixed_address(
        &self,
        view: &str,
        cidr: &str,
        _ip_hint: Option<&str>,
        _mac_hint: Option<&str>,
    ) -> Result<Option<FixedAddress>> {
        self.record(Call::GetFixedAddress)?;
        match &self.lookup {
            Lookup::Missing => Ok(None),
            Lookup::Found(ip) => Ok(Some(FixedAddress {
                reference: format!("fixedaddress/ZG5z:{ip}/{view}"),
                network_view: view.to_string(),
                cidr: cidr.to_string(),
                ip_address: ip.clone(),
                ..FixedAddress::default()
            })),
            Lookup::Fails => Err(InfobloxError::Connection("lookup refused".into())),
        }
    }

    async fn allocate_address(
        &self,
        view: &str,
        cidr: &str,
        ip_hint: Option<&str>,
        mac: Option<&str>,
        _name: Option<&str>,
        _attrs: &ExtAttrs,
    ) -> Result<FixedAddress> {
        let nth = self.count(Call::AllocateAddress);
        self.record(Call::AllocateAddress)?;
        self.address_hints
            .lock()
            .unwrap()
            .push(ip_hint.map(String::from));

        if self.fail_address_at == Some(nth) {
            return Err(InfobloxError::Api {
                code: 400,
                message: "no free address".into(),
            });
        }

        let ip = ip_hint.map_or_else(|| format!("10.0.0.{}", nth + 1), String::from);
        Ok(FixedAddress {
            reference: format!("fixedaddress/ZG5z:{ip}/{view}"),
            network_view: view.to_string(),
            cidr: cidr.to_string(),
            ip_address: ip,
            mac: mac.unwrap_or_default().to_string(),
            ..FixedAddress::default()
        })
    }

    async fn delete_network(&self, _reference: &str, _view: &str) -> Result<()> {
        self.record(Call::DeleteNetwork)
    }

    async fn get_network_by_ref(&self, reference: &str) -> Result<Network> {
        self.record(Call::GetNetworkByRef)?;
        let mut network = Network::from_ref(reference).ok_or_else(|| InfobloxError::NotFound {
            resource: reference.to_string(),
        })?;
        if let Some(view) = &self.reported_view {
            network.network_view.clone_from(view);
        }
        Ok(network)
    }

    async fn get_network(&self, view: &str, cidr: &str, _attrs: &ExtAttrs) -> Result<Network> {
        self.record(Call::GetNetwork)?;
        Ok(Network {
            reference: format!("network/ZG5z:{cidr}/{view}"),
            network_view: self.reported_view.clone().unwrap_or_else(|| view.to_string()),
            cidr: cidr.to_string(),
            ..Network::default()
        })
    }

    async fn list_zones(&self) -> Result<Vec<ZoneAuth>> {
        self.record(Call::ListZones)?;
        Ok(self.zones.clone())
    }

    async fn create_zone(&self, fqdn: &str, view: &str, attrs: &ExtAttrs) -> Result<ZoneAuth> {
        self.record(Call::CreateZone)?;
        Ok(ZoneAuth {
            reference: format!("zone_auth/ZG5z:{fqdn}/{view}"),
            fqdn: fqdn.to_string(),
            view: view.to_string(),
            ea: attrs.clone(),
        })
    }

    async fn get_zone_by_ref(&self, reference: &str) -> Result<ZoneAuth> {
        self.record(Call::GetZoneByRef)?;
        if let Some(zone) = self.zones.iter().find(|z| z.reference == reference) {
            return Ok(zone.clone());
        }

        // Zones created through the fake are rebuilt from their reference
        let (fqdn, view) = ObjectRef::parse(reference)
            .and_then(|r| r.split_view(1))
            .ok_or_else(|| InfobloxError::NotFound {
                resource: reference.to_string(),
            })?;
        Ok(ZoneAuth {
            reference: reference.to_string(),
            fqdn: fqdn.to_string(),
            view: self.reported_view.clone().unwrap_or_else(|| view.to_string()),
            ..ZoneAuth::default()
        })
    }

    async fn delete_zone(&self, _reference: &str) -> Result<()> {
        self.record(Call::DeleteZone)
    }
}
