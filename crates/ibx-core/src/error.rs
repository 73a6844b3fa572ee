use thiserror::Error;

/// Result type alias for WAPI operations
pub type Result<T> = std::result::Result<T, InfobloxError>;

/// Errors that can occur when talking to the Infoblox WAPI
#[derive(Error, Debug)]
pub enum InfobloxError {
    /// Authentication failed - bad username or password
    #[error("authentication failed: invalid credentials")]
    Unauthorized,

    /// Object not found
    #[error("object not found: {resource}")]
    NotFound {
        /// Description of the object that wasn't found
        resource: String,
    },

    /// WAPI returned an error response
    #[error("WAPI error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error text reported by the grid master
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Object reference could not be parsed
    #[error("invalid object reference: {0}")]
    InvalidReference(String),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl InfobloxError {
    /// Returns true if the error is transient and the whole operation may be retried
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Connection(_))
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns true if the remote object does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
