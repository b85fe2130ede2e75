use std::io;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use crn_types::Identifier;
use reqwest::StatusCode;
use tracing::debug;

use crate::stream::{ContentSource, ContentStream};
use crate::transport::{ObjectTransport, TransportError, TransportResult};

/// Path prefix for object content on a coordinating node.
pub const OBJECT_PATH: &str = "/v1/object";

/// Settings for [`HttpTransport`].
#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// Whole-request timeout, including the body.
    pub timeout: Duration,
    /// User agent presented to the coordinating node.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("crn/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// HTTP transport for fetching objects from a coordinating node.
///
/// Issues `GET {endpoint}/v1/object/{identifier}`. A 404 or 410 response is
/// the absence condition; every other error status and every request error
/// is a transport fault. The response body is handed to the caller as a
/// [`ContentStream`] without buffering.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given settings.
    pub fn new(config: HttpConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client }
    }

    /// The URL object content is fetched from.
    ///
    /// The identifier is percent-encoded: it is opaque to the client but must
    /// survive as a single path segment.
    pub fn object_url(endpoint: &str, identifier: &Identifier) -> String {
        format!(
            "{}{}/{}",
            endpoint.trim_end_matches('/'),
            OBJECT_PATH,
            urlencoding::encode(identifier.as_str())
        )
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(HttpConfig::default())
    }
}

#[async_trait]
impl ObjectTransport for HttpTransport {
    async fn fetch(
        &self,
        endpoint: &str,
        identifier: &Identifier,
    ) -> TransportResult<ContentStream> {
        let url = Self::object_url(endpoint, identifier);
        debug!(%identifier, %url, "fetching object");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| TransportError::failed(identifier.clone(), err))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(TransportError::absent(endpoint, identifier.clone()));
        }
        let response = response
            .error_for_status()
            .map_err(|err| TransportError::failed(identifier.clone(), err))?;

        Ok(ContentStream::new(Box::new(HttpBody { response })))
    }
}

struct HttpBody {
    response: reqwest::Response,
}

#[async_trait]
impl ContentSource for HttpBody {
    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        self.response.chunk().await.map_err(io::Error::other)
    }
}
