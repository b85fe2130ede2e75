use async_trait::async_trait;
use crn_types::Identifier;
use thiserror::Error;

use crate::stream::ContentStream;

/// Failure reported by a transport when fetching one object.
///
/// The client depends only on this binary distinction: either the endpoint
/// answered and does not have the object, or the fetch failed for any other
/// reason. Transport-specific detail lives in the wrapped cause.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint does not have the object.
    #[error("object {identifier} not present at {endpoint}")]
    Absent {
        endpoint: String,
        identifier: Identifier,
    },

    /// Connectivity, protocol, or authorization failure.
    #[error("fetch of {identifier} failed: {source}")]
    Failed {
        identifier: Identifier,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TransportError {
    /// Absence condition for `identifier` at `endpoint`.
    pub fn absent(endpoint: impl Into<String>, identifier: Identifier) -> Self {
        Self::Absent {
            endpoint: endpoint.into(),
            identifier,
        }
    }

    /// Fault condition wrapping the underlying failure.
    pub fn failed(
        identifier: Identifier,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Failed {
            identifier,
            source: source.into(),
        }
    }

    /// Returns `true` for the absence condition.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent { .. })
    }
}

/// Result alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Fetches object content from a remote coordinating node.
///
/// Implementations must report an object the endpoint does not have as
/// [`TransportError::Absent`] and every other failure as
/// [`TransportError::Failed`]; the resolver's failure mapping relies on it.
#[async_trait]
pub trait ObjectTransport: Send + Sync {
    /// Fetch the content of `identifier` from `endpoint`.
    ///
    /// On success the returned stream is open and owned by the caller.
    async fn fetch(
        &self,
        endpoint: &str,
        identifier: &Identifier,
    ) -> TransportResult<ContentStream>;
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn absent_is_distinguishable() {
        let err = TransportError::absent("http://node", id("demo:1"));
        assert!(err.is_absent());
        assert!(err.to_string().contains("demo:1"));
        assert!(err.to_string().contains("http://node"));
    }

    #[test]
    fn failed_preserves_cause() {
        let cause = std::io::Error::other("timed out");
        let err = TransportError::failed(id("demo:1"), cause);
        assert!(!err.is_absent());
        assert_eq!(err.source().unwrap().to_string(), "timed out");
    }
}
