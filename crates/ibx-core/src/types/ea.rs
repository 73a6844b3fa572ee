use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// EA key holding the tenant that owns an object
pub const EA_TENANT_ID: &str = "Tenant ID";

/// EA key naming the cloud-management platform that created an object
pub const EA_CMP_TYPE: &str = "CMP Type";

/// EA key marking objects owned by the cloud API
pub const EA_CLOUD_API_OWNED: &str = "Cloud API Owned";

/// EA key holding a human-readable network name
pub const EA_NETWORK_NAME: &str = "Network Name";

/// A single extensible attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EaValue {
    /// Free-form string
    Str(String),
    /// Integer
    Int(i64),
    /// Boolean, carried on the wire as `"True"` / `"False"`
    Bool(bool),
}

impl fmt::Display for EaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for EaValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for EaValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for EaValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for EaValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Serialize for EaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Bool(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for EaValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(match s.as_str() {
                "True" => Self::Bool(true),
                "False" => Self::Bool(false),
                _ => Self::Str(s),
            }),
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| de::Error::custom(format!("unsupported EA number: {n}"))),
            // Multi-value EAs are flattened to a comma-separated string
            serde_json::Value::Array(items) => Ok(Self::Str(
                items
                    .iter()
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), String::from))
                    .collect::<Vec<_>>()
                    .join(","),
            )),
            other => Err(de::Error::custom(format!("unsupported EA value: {other}"))),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct EaEntry {
    value: EaValue,
}

/// Extensible attributes attached to a WAPI object
///
/// Serialized in the WAPI shape `{"Key": {"value": ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtAttrs(BTreeMap<String, EaValue>);

impl ExtAttrs {
    /// Create an empty attribute set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set an attribute, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<EaValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<EaValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get an attribute value
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EaValue> {
        self.0.get(key)
    }

    /// Get an attribute as a string slice, if it is a string
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(EaValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Copy every attribute of `other` into `self`, `other` winning on conflicts
    pub fn extend(&mut self, other: &Self) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Returns true if no attributes are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of attributes
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over key-value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EaValue)> {
        self.0.iter()
    }
}

impl Serialize for ExtAttrs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, &EaEntry { value: v.clone() })?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExtAttrs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, EaEntry>::deserialize(deserializer)?;
        Ok(Self(raw.into_iter().map(|(k, e)| (k, e.value)).collect()))
    }
}

impl<K: Into<String>, V: Into<EaValue>> FromIterator<(K, V)> for ExtAttrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape() {
        let ea = ExtAttrs::new()
            .with(EA_TENANT_ID, "t-1")
            .with(EA_CLOUD_API_OWNED, true)
            .with("VLAN", 42);

        let value = serde_json::to_value(&ea).unwrap();
        assert_eq!(
            value,
            json!({
                "Cloud API Owned": {"value": "True"},
                "Tenant ID": {"value": "t-1"},
                "VLAN": {"value": 42}
            })
        );
    }

    #[test]
    fn test_parse_from_wapi() {
        let ea: ExtAttrs = serde_json::from_value(json!({
            "Cloud API Owned": {"value": "False"},
            "Tenant ID": {"value": "acme"},
            "Sites": {"value": ["a", "b"]}
        }))
        .unwrap();

        assert_eq!(ea.get(EA_CLOUD_API_OWNED), Some(&EaValue::Bool(false)));
        assert_eq!(ea.get_str(EA_TENANT_ID), Some("acme"));
        assert_eq!(ea.get_str("Sites"), Some("a,b"));
    }

    #[test]
    fn test_extend_overrides() {
        let mut base = ExtAttrs::new().with(EA_TENANT_ID, "old");
        base.extend(&ExtAttrs::new().with(EA_TENANT_ID, "new").with("Owner", "ops"));
        assert_eq!(base.get_str(EA_TENANT_ID), Some("new"));
        assert_eq!(base.len(), 2);
    }
}
