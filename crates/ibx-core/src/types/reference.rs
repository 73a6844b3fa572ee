use std::fmt;

/// A parsed WAPI object reference
///
/// References look like `network/ZG5zLm5ldHdvcmskMTAuMC4wLjAvMjQvMA:10.0.0.0/24/default`:
/// an object type, an opaque id, and a readable name part whose layout
/// depends on the object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef<'a> {
    /// WAPI object type (`network`, `fixedaddress`, `zone_auth`, ...)
    pub object_type: &'a str,
    /// Opaque, base64-ish object id
    pub id: &'a str,
    /// Human-readable trailer after the first `:`
    pub name: &'a str,
}

impl<'a> ObjectRef<'a> {
    /// Split a raw reference into its parts
    ///
    /// The id never contains `:`, so IPv6 addresses in the name part survive.
    #[must_use]
    pub fn parse(raw: &'a str) -> Option<Self> {
        let (object_type, rest) = raw.split_once('/')?;
        let (id, name) = rest.split_once(':')?;

        if object_type.is_empty() || id.is_empty() {
            return None;
        }

        Some(Self {
            object_type,
            id,
            name,
        })
    }

    /// Split the name part into its address-ish prefix and the trailing view
    ///
    /// `10.0.0.0/24/default` yields `("10.0.0.0/24", "default")` when
    /// `segments` is 2, `10.0.0.5/default` yields `("10.0.0.5", "default")`
    /// when `segments` is 1.
    #[must_use]
    pub fn split_view(&self, segments: usize) -> Option<(&'a str, &'a str)> {
        let mut cut = 0;
        for _ in 0..segments {
            let idx = self.name[cut..].find('/')?;
            cut += idx + 1;
        }

        let head = self.name[..cut].strip_suffix('/')?;
        let view = &self.name[cut..];
        if head.is_empty() || view.is_empty() {
            return None;
        }
        Some((head, view))
    }
}

impl fmt::Display for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.object_type, self.id, self.name)
    }
}
