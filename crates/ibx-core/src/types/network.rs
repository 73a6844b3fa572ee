use serde::{Deserialize, Serialize};

use super::{ExtAttrs, ObjectRef, EA_NETWORK_NAME};

/// An IPv4 network block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    /// Object reference
    #[serde(rename = "_ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,

    /// Network view the block lives in
    #[serde(default)]
    pub network_view: String,

    /// Block in CIDR notation, or a `func:` allocation expression on create
    #[serde(rename = "network", default)]
    pub cidr: String,

    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "ExtAttrs::is_empty")]
    pub ea: ExtAttrs,
}

impl Network {
    /// Fields requested from WAPI when reading networks back
    pub const RETURN_FIELDS: &'static str = "network,network_view,comment,extattrs";

    /// Rebuild a network from its object reference
    ///
    /// Returns `None` unless the reference is a `network/...:<cidr>/<view>` ref.
    #[must_use]
    pub fn from_ref(reference: &str) -> Option<Self> {
        let parsed = ObjectRef::parse(reference)?;
        if parsed.object_type != "network" {
            return None;
        }

        let (cidr, view) = parsed.split_view(2)?;
        Some(Self {
            reference: reference.to_string(),
            network_view: view.to_string(),
            cidr: cidr.to_string(),
            ..Self::default()
        })
    }

    /// Expression asking WAPI for the next free child block of `prefix_len`
    #[must_use]
    pub fn next_available(parent_cidr: &str, view: &str, prefix_len: u32) -> String {
        format!("func:nextavailablenetwork:{parent_cidr},{view},{prefix_len}")
    }

    /// Human-readable name stored in the `Network Name` attribute
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.ea.get_str(EA_NETWORK_NAME)
    }

    /// Prefix length parsed from the CIDR, if it is concrete
    #[must_use]
    pub fn prefix_len(&self) -> Option<u8> {
        self.cidr.rsplit_once('/')?.1.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_ref() {
        let net = Network::from_ref("network/ZG5zLm5ldHdvcmskMTAuMC4wLjAvMjQvMA:10.1.2.0/24/prod")
            .unwrap();
        assert_eq!(net.cidr, "10.1.2.0/24");
        assert_eq!(net.network_view, "prod");
        assert_eq!(net.prefix_len(), Some(24));
    }

    #[test]
    fn test_from_ref_wrong_type() {
        assert!(Network::from_ref("zone_auth/ZG5z:aaa.com/default").is_none());
    }

    #[test]
    fn test_next_available_expression() {
        assert_eq!(
            Network::next_available("10.0.0.0/8", "default", 24),
            "func:nextavailablenetwork:10.0.0.0/8,default,24"
        );
    }

    #[test]
    fn test_deserialize_wapi_object() {
        let net: Network = serde_json::from_value(json!({
            "_ref": "network/abc:10.0.0.0/24/default",
            "network": "10.0.0.0/24",
            "network_view": "default",
            "extattrs": {"Network Name": {"value": "web"}}
        }))
        .unwrap();

        assert_eq!(net.name(), Some("web"));
        assert_eq!(net.reference, "network/abc:10.0.0.0/24/default");
    }
}
