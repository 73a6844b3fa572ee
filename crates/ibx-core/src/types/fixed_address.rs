use serde::{Deserialize, Serialize};

use super::{ExtAttrs, ObjectRef};

/// MAC placeholder for addresses that are reserved rather than bound to a host
pub const MAC_ADDR_ZERO: &str = "00:00:00:00:00:00";

/// A fixed IPv4 address inside a network block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FixedAddress {
    /// Object reference
    #[serde(rename = "_ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,

    /// Network view
    #[serde(default)]
    pub network_view: String,

    /// Enclosing block in CIDR notation
    #[serde(rename = "network", default)]
    pub cidr: String,

    /// The address, or a `func:` allocation expression on create
    #[serde(rename = "ipv4addr", default)]
    pub ip_address: String,

    /// Hardware address
    #[serde(default)]
    pub mac: String,

    /// Host name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "ExtAttrs::is_empty")]
    pub ea: ExtAttrs,
}

impl FixedAddress {
    /// Fields requested from WAPI when reading fixed addresses back
    pub const RETURN_FIELDS: &'static str = "ipv4addr,network,network_view,mac,name,extattrs";

    /// Expression asking WAPI for the next free address in `cidr`
    #[must_use]
    pub fn next_available(cidr: &str, view: &str) -> String {
        format!("func:nextavailableip:{cidr},{view}")
    }

    /// Recover the concrete address from the object reference
    ///
    /// Useful when a create call answered with a bare reference while the
    /// request carried a `func:` expression.
    #[must_use]
    pub fn ip_from_ref(reference: &str) -> Option<&str> {
        let parsed = ObjectRef::parse(reference)?;
        if parsed.object_type != "fixedaddress" {
            return None;
        }
        parsed.split_view(1).map(|(ip, _)| ip)
    }

    /// Returns true if the address still holds an allocation expression
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.ip_address.starts_with("func:")
    }
}
