use serde::{Deserialize, Serialize};

use super::ExtAttrs;

/// An authoritative DNS zone
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneAuth {
    /// Object reference
    #[serde(rename = "_ref", default, skip_serializing_if = "String::is_empty")]
    pub reference: String,

    /// Zone name
    #[serde(default)]
    pub fqdn: String,

    /// DNS view
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub view: String,

    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "ExtAttrs::is_empty")]
    pub ea: ExtAttrs,
}

impl ZoneAuth {
    /// Fields requested from WAPI when reading zones back
    pub const RETURN_FIELDS: &'static str = "fqdn,view,extattrs";
}
