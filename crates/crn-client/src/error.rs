use crn_types::Identifier;
use thiserror::Error;

/// Failure taxonomy for client-side operations.
///
/// Exactly two kinds. Every fallible operation in this crate fails with one
/// of them, never an unclassified error, so callers can branch on "was the
/// object simply absent" versus "something went wrong".
#[derive(Debug, Error)]
pub enum ClientError {
    /// The object was expected in the repository's cache/store and was not
    /// found there. Absence is not an operational fault and carries no cause.
    #[error("object not found in repository store: {identifier}")]
    CacheMiss { identifier: Identifier },

    /// A client-side operation failed. Always wraps the originating error;
    /// the cause chain stays reachable through [`std::error::Error::source`].
    #[error("{message}")]
    Operation {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ClientError {
    /// Absence signal for `identifier`.
    pub fn cache_miss(identifier: Identifier) -> Self {
        Self::CacheMiss { identifier }
    }

    /// Operational fault with its originating cause.
    pub fn operation(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Operation {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Returns `true` for the absence signal.
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheMiss { .. })
    }
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
