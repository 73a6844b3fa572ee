//! Sub-domain conflict detection for auth zone deletion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a zone name is judged to be a sub-domain of another
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubdomainMatch {
    /// Any other zone whose name contains the target as a substring.
    ///
    /// `badaaa.com` counts as a sub-domain of `aaa.com` under this rule.
    #[default]
    Substring,
    /// Only zones ending in `.<target>`
    LabelSuffix,
}

impl SubdomainMatch {
    /// Returns true if `candidate` is a sub-domain of `target` under this rule
    ///
    /// A name is never its own sub-domain. Comparison is case-sensitive.
    #[must_use]
    pub fn matches(self, candidate: &str, target: &str) -> bool {
        if candidate == target {
            return false;
        }

        match self {
            Self::Substring => candidate.contains(target),
            Self::LabelSuffix => candidate
                .strip_suffix(target)
                .is_some_and(|head| head.ends_with('.')),
        }
    }

    /// First zone in `zones` that is a sub-domain of `target`
    pub fn find<'a, I>(self, target: &str, zones: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        zones.into_iter().find(|z| self.matches(z, target))
    }
}

impl fmt::Display for SubdomainMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Substring => write!(f, "substring"),
            Self::LabelSuffix => write!(f, "label-suffix"),
        }
    }
}

/// Returns true if any zone in `zones` other than `target` contains `target`
///
/// This is the literal substring rule used by the zone deletion guard.
pub fn has_subdomain<'a, I>(target: &str, zones: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    SubdomainMatch::Substring.find(target, zones).is_some()
}
