use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Opaque handle naming one object in the repository network.
///
/// An `Identifier` is an immutable string key. The client never interprets
/// its contents: two identifiers are related only by equality. Validation is
/// minimal; the value must be non-empty and free of whitespace and control
/// characters, since it travels as a URL path segment.
///
/// Identifiers carry no uniqueness guarantee; a batch may name the same
/// object more than once and each occurrence is handled independently.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Validate and wrap a raw identifier string.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TypeError::EmptyIdentifier);
        }
        if let Some(character) = value.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidIdentifier { value, character });
        }
        Ok(Self(value))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_plain_identifiers() {
        let id = Identifier::new("demo:5").unwrap();
        assert_eq!(id.as_str(), "demo:5");
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Identifier::new("").unwrap_err(), TypeError::EmptyIdentifier);
    }

    #[test]
    fn new_rejects_whitespace() {
        let err = Identifier::new("demo 5").unwrap_err();
        assert!(matches!(
            err,
            TypeError::InvalidIdentifier { character: ' ', .. }
        ));
    }

    #[test]
    fn new_rejects_control_characters() {
        let err = Identifier::new("demo\n5").unwrap_err();
        assert!(matches!(err, TypeError::InvalidIdentifier { .. }));
    }

    #[test]
    fn display_is_the_raw_value() {
        let id = Identifier::new("obj-42").unwrap();
        assert_eq!(format!("{id}"), "obj-42");
    }

    #[test]
    fn debug_names_the_type() {
        let id = Identifier::new("obj-42").unwrap();
        assert_eq!(format!("{id:?}"), "Identifier(obj-42)");
    }

    #[test]
    fn from_str_validates() {
        let id: Identifier = "demo:1".parse().unwrap();
        assert_eq!(id.as_str(), "demo:1");
        assert!("bad id".parse::<Identifier>().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let id = Identifier::new("demo:1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"demo:1\"");
        let parsed: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_rejects_invalid() {
        assert!(serde_json::from_str::<Identifier>("\"\"").is_err());
        assert!(serde_json::from_str::<Identifier>("\"a b\"").is_err());
    }

    #[test]
    fn into_string_returns_inner() {
        let id = Identifier::new("demo:1").unwrap();
        assert_eq!(id.into_string(), "demo:1");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = Identifier::new("a").unwrap();
        let b = Identifier::new("b").unwrap();
        assert!(a < b);
    }
}
