//! Core client for the CRN distributed content repository network.
//!
//! The client resolves opaque object identifiers to content streams fetched
//! from a remote coordinating node, and retrieves batches of identifiers with
//! per-item failure isolation: one object's failure never aborts the rest of
//! the run.
//!
//! # Key pieces
//!
//! - [`ClientError`] — the two-kind failure taxonomy: [`ClientError::CacheMiss`]
//!   (the object is simply absent) versus [`ClientError::Operation`] (a fault,
//!   with its cause preserved)
//! - [`ObjectTransport`] — the seam to the wire; [`HttpTransport`] and
//!   [`MemoryTransport`] implement it
//! - [`ObjectResolver`] — one identifier to one open [`ContentStream`]
//! - [`BatchPipeline`] — ordered, continue-on-error retrieval over a sequence
//!   of identifiers, accounted in a [`BatchReport`]
//!
//! Configuration is read from a [`crn_config::LayeredConfig`] passed in by
//! reference; [`defaults::source()`] provides the library-default values to
//! register behind the application's own sources.

pub mod batch;
pub mod defaults;
pub mod error;
pub mod http;
pub mod memory;
pub mod resolver;
pub mod stream;
pub mod transport;

pub use batch::{BatchPipeline, BatchReport, RetrievalOutcome, RetrievalStatus};
pub use error::{ClientError, ClientResult};
pub use http::{HttpConfig, HttpTransport};
pub use memory::MemoryTransport;
pub use resolver::ObjectResolver;
pub use stream::{ContentSource, ContentStream};
pub use transport::{ObjectTransport, TransportError, TransportResult};
