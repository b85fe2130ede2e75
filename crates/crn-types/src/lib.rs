//! Foundation types for the CRN client.
//!
//! CRN is a client for a distributed content repository network: objects live
//! on remote coordinating nodes and are addressed by opaque string
//! identifiers. This crate provides the identifier type shared by every other
//! CRN crate.

pub mod error;
pub mod identifier;

pub use error::TypeError;
pub use identifier::Identifier;
