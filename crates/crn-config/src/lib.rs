//! Layered configuration for the CRN client.
//!
//! Settings come from an ordered list of [`ConfigSource`]s (in-memory maps,
//! TOML files, environment variables) merged by [`LayeredConfig`] under a
//! single rule: the first source that defines a key wins. Consumers register
//! their own sources ahead of the library defaults, so application settings
//! override defaults without losing either.

pub mod error;
pub mod layered;
pub mod source;

pub use error::{ConfigError, ConfigResult};
pub use layered::LayeredConfig;
pub use source::{ConfigSource, EnvSource, MapSource, TomlSource};
