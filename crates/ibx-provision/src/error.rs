use ibx_core::InfobloxError;
use std::num::ParseIntError;
use thiserror::Error;

/// Result type alias for provisioning workflows
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Broad class of a provisioning failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input was malformed; nothing was sent
    Validation,
    /// A remote call failed
    Remote,
    /// The request was refused before the remote call it asked for
    Policy,
}

/// Errors raised by the provisioning workflows
///
/// None of them are retried or rolled back: a failure ends the invocation and
/// whatever earlier steps already created stays on the grid.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Prefix length is not an unsigned integer
    #[error("error converting prefix length {value:?} to an integer: {source}")]
    InvalidPrefixLength {
        /// The rejected input
        value: String,
        /// Parse failure
        source: ParseIntError,
    },

    /// No tenant to stamp on created objects
    #[error("{resource} requires a tenant id")]
    MissingTenant {
        /// Resource kind
        resource: &'static str,
    },

    /// Operation needs a remote reference the state does not have
    #[error("{resource} has no remote reference")]
    MissingReference {
        /// Resource label
        resource: String,
    },

    /// Child network allocation failed
    #[error("creation of network block failed in network view ({view}): {source}")]
    Allocation {
        /// Network view
        view: String,
        /// Remote failure
        source: InfobloxError,
    },

    /// Gateway address could not be created
    #[error("gateway creation failed in network block ({cidr}): {source}")]
    GatewayCreation {
        /// Allocated block
        cidr: String,
        /// Remote failure
        source: InfobloxError,
    },

    /// An extra address reservation failed
    #[error("reservation in network block failed in network view ({view}): {source}")]
    Reservation {
        /// Network view
        view: String,
        /// Remote failure
        source: InfobloxError,
    },

    /// Reading a network back failed
    #[error("getting network block from network view ({view}) failed: {source}")]
    NetworkRead {
        /// Network view
        view: String,
        /// Remote failure
        source: InfobloxError,
    },

    /// Network deletion failed
    #[error("deletion of network block failed from network view ({view}): {source}")]
    NetworkDelete {
        /// Network view
        view: String,
        /// Remote failure
        source: InfobloxError,
    },

    /// The resource cannot be changed in place
    #[error("{resource} update is not supported")]
    UpdateNotSupported {
        /// Resource kind
        resource: &'static str,
    },

    /// Listing zones for the sub-domain guard failed
    #[error("getting a list of all current auth zones failed: {source}")]
    ZoneList {
        /// Remote failure
        source: InfobloxError,
    },

    /// Zone still has a sub-domain and must not be deleted
    #[error("cannot delete an auth zone that has a sub-domain: {fqdn} (found {subdomain})")]
    SubdomainConflict {
        /// Zone that was to be deleted
        fqdn: String,
        /// First conflicting zone
        subdomain: String,
    },

    /// Zone creation failed
    #[error("error creating auth zone ({fqdn}): {source}")]
    ZoneCreate {
        /// Zone name
        fqdn: String,
        /// Remote failure
        source: InfobloxError,
    },

    /// Reading a zone back failed
    #[error("getting auth zone ({fqdn}) failed: {source}")]
    ZoneRead {
        /// Zone name
        fqdn: String,
        /// Remote failure
        source: InfobloxError,
    },

    /// Zone deletion failed
    #[error("deletion of auth zone ({fqdn}) failed: {source}")]
    ZoneDelete {
        /// Zone name
        fqdn: String,
        /// Remote failure
        source: InfobloxError,
    },
}

impl ProvisionError {
    /// Classify the error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPrefixLength { .. }
            | Self::MissingTenant { .. }
            | Self::MissingReference { .. } => ErrorKind::Validation,
            Self::UpdateNotSupported { .. } | Self::SubdomainConflict { .. } => ErrorKind::Policy,
            _ => ErrorKind::Remote,
        }
    }

    /// The underlying remote failure, if any
    #[must_use]
    pub const fn remote(&self) -> Option<&InfobloxError> {
        match self {
            Self::Allocation { source, .. }
            | Self::GatewayCreation { source, .. }
            | Self::Reservation { source, .. }
            | Self::NetworkRead { source, .. }
            | Self::NetworkDelete { source, .. }
            | Self::ZoneList { source }
            | Self::ZoneCreate { source, .. }
            | Self::ZoneRead { source, .. }
            | Self::ZoneDelete { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns true if the remote object is gone
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.remote(), Some(e) if e.is_not_found())
    }
}
