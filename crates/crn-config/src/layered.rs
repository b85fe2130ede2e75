use std::fmt;

use crate::error::{ConfigError, ConfigResult};
use crate::source::ConfigSource;

/// Precedence-ordered merged view over configuration sources.
///
/// Construction is initialization: the source list is frozen when the value
/// is built and the merged view is read-only for its whole life. Sources are
/// consulted in registration order and the first one that defines a key wins
/// permanently; later sources' values for the same key are never observed.
///
/// Register consumer sources ahead of library defaults, so an application
/// setting overrides the default without erasing it for other keys.
pub struct LayeredConfig {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl LayeredConfig {
    /// Build the merged view over `sources`, highest precedence first.
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// A view with no sources; every lookup is `None`.
    pub fn empty() -> Self {
        Self { sources: Vec::new() }
    }

    /// The value for `key` from the first source that defines it.
    ///
    /// A key no source defines is `None`: absence is a normal outcome, not
    /// a failure.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.lookup(key))
    }

    /// Like [`get_string`](Self::get_string), falling back to `default`.
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    /// The value for `key`, or [`ConfigError::MissingKey`] if no source
    /// defines it. For callers that cannot proceed without a value.
    pub fn require(&self, key: &str) -> ConfigResult<String> {
        self.get_string(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// The diagnostic name of the source that defines `key`, if any.
    pub fn defining_source(&self, key: &str) -> Option<&str> {
        self.sources
            .iter()
            .find(|source| source.lookup(key).is_some())
            .map(|source| source.name())
    }

    /// Number of registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl fmt::Debug for LayeredConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("LayeredConfig").field("sources", &names).finish()
    }
}
