use std::fmt;
use std::io;

use async_trait::async_trait;
use bytes::Bytes;

/// Chunked byte supplier behind a [`ContentStream`].
///
/// Transports implement this for whatever carries their payload (an HTTP
/// response body, an in-memory buffer). Chunk boundaries carry no meaning.
#[async_trait]
pub trait ContentSource: Send {
    /// The next chunk of content, or `None` once the stream is exhausted.
    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>>;
}

/// An open, readable stream of object content.
///
/// The caller owns the stream: drain it with [`read_to_end`], pull chunks
/// with [`next_chunk`], or drop it to close the underlying connection
/// without consuming the payload. The client never buffers content on the
/// caller's behalf.
///
/// [`read_to_end`]: Self::read_to_end
/// [`next_chunk`]: Self::next_chunk
pub struct ContentStream {
    source: Box<dyn ContentSource>,
}

impl ContentStream {
    /// Wrap a transport-provided source.
    pub fn new(source: Box<dyn ContentSource>) -> Self {
        Self { source }
    }

    /// A stream over a fixed in-memory buffer, yielded as a single chunk.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::new(Box::new(BytesSource {
            data: Some(data.into()),
        }))
    }

    /// The next chunk of content, or `None` once exhausted.
    pub async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        self.source.next_chunk().await
    }

    /// Drain the whole stream into memory.
    pub async fn read_to_end(mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        while let Some(chunk) = self.next_chunk().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf)
    }
}

impl fmt::Debug for ContentStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStream").finish_non_exhaustive()
    }
}

struct BytesSource {
    data: Option<Bytes>,
}

#[async_trait]
impl ContentSource for BytesSource {
    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        Ok(self.data.take().filter(|chunk| !chunk.is_empty()))
    }
}
