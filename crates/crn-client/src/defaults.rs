//! Library-default configuration.
//!
//! Applications register [`source()`] behind their own configuration sources:
//! under first-loaded-wins precedence the application's values shadow these
//! without removing them for keys the application leaves unset.

use crn_config::MapSource;

/// Base URL of the coordinating node objects are fetched from.
pub const ENDPOINT_KEY: &str = "repository.endpoint";

/// Endpoint assumed when no source configures one: a node on this host.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9418";

/// The library-default configuration source.
pub fn source() -> MapSource {
    MapSource::new("crn-defaults").with(ENDPOINT_KEY, DEFAULT_ENDPOINT)
}

#[cfg(test)]
mod tests {
    use crn_config::ConfigSource;

    use super::*;

    #[test]
    fn defaults_define_the_endpoint() {
        let source = source();
        assert_eq!(source.lookup(ENDPOINT_KEY), Some(DEFAULT_ENDPOINT.into()));
        assert_eq!(source.name(), "crn-defaults");
    }
}
