use crn_config::LayeredConfig;
use crn_types::Identifier;
use tracing::debug;

use crate::defaults;
use crate::error::{ClientError, ClientResult};
use crate::stream::ContentStream;
use crate::transport::{ObjectTransport, TransportError};

/// Resolves one identifier to an open content stream.
///
/// The resolver reads the endpoint from the configuration at resolution time
/// and delegates the fetch to its transport. Its real job is the failure
/// mapping: a transport absence becomes [`ClientError::CacheMiss`], anything
/// else becomes [`ClientError::Operation`] with the transport error as cause,
/// and nothing unclassified escapes.
///
/// The configuration is borrowed, not owned: callers construct one
/// [`LayeredConfig`] and share it read-only.
pub struct ObjectResolver<'c, T> {
    config: &'c LayeredConfig,
    transport: T,
}

impl<'c, T: ObjectTransport> ObjectResolver<'c, T> {
    /// Build a resolver over `config` and `transport`.
    pub fn new(config: &'c LayeredConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// The endpoint the next resolution will fetch from, read at call time.
    pub fn endpoint(&self) -> ClientResult<String> {
        self.config
            .require(defaults::ENDPOINT_KEY)
            .map_err(|err| ClientError::operation("no repository endpoint configured", err))
    }

    /// Resolve `identifier` to an open content stream.
    ///
    /// The caller owns the returned stream and is responsible for closing it
    /// (dropping it) on every exit path.
    pub async fn resolve(&self, identifier: &Identifier) -> ClientResult<ContentStream> {
        let endpoint = self.endpoint()?;
        debug!(%identifier, %endpoint, "resolving object");

        match self.transport.fetch(&endpoint, identifier).await {
            Ok(stream) => Ok(stream),
            Err(TransportError::Absent { .. }) => Err(ClientError::cache_miss(identifier.clone())),
            Err(err @ TransportError::Failed { .. }) => Err(ClientError::operation(
                format!("transport fetch failed for {identifier}"),
                err,
            )),
        }
    }
}
