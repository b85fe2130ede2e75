use std::collections::HashMap;
use std::io;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use crn_types::Identifier;

use crate::stream::ContentStream;
use crate::transport::{ObjectTransport, TransportError, TransportResult};

/// In-memory, HashMap-backed transport.
///
/// Intended for tests and embedding. Objects are held behind a `RwLock`; an
/// identifier with no entry reports the absence condition, and faults can be
/// scripted per identifier to exercise failure handling. The endpoint
/// argument is accepted and ignored; there is no wire.
pub struct MemoryTransport {
    objects: RwLock<HashMap<String, Bytes>>,
    faults: RwLock<HashMap<String, String>>,
}

impl MemoryTransport {
    /// Create an empty transport.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            faults: RwLock::new(HashMap::new()),
        }
    }

    /// Store content for `identifier`.
    pub fn insert(&self, identifier: &Identifier, data: impl Into<Bytes>) {
        self.objects
            .write()
            .expect("lock poisoned")
            .insert(identifier.as_str().to_string(), data.into());
    }

    /// Script a fault for `identifier`: the next and every later fetch of it
    /// fails with an I/O error carrying `message` as the cause.
    pub fn inject_fault(&self, identifier: &Identifier, message: impl Into<String>) {
        self.faults
            .write()
            .expect("lock poisoned")
            .insert(identifier.as_str().to_string(), message.into());
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectTransport for MemoryTransport {
    async fn fetch(
        &self,
        endpoint: &str,
        identifier: &Identifier,
    ) -> TransportResult<ContentStream> {
        if let Some(message) = self
            .faults
            .read()
            .expect("lock poisoned")
            .get(identifier.as_str())
        {
            return Err(TransportError::failed(
                identifier.clone(),
                io::Error::other(message.clone()),
            ));
        }
        let objects = self.objects.read().expect("lock poisoned");
        match objects.get(identifier.as_str()) {
            Some(data) => Ok(ContentStream::from_bytes(data.clone())),
            None => Err(TransportError::absent(endpoint, identifier.clone())),
        }
    }
}
