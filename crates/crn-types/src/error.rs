use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("identifier {value:?} contains forbidden character {character:?}")]
    InvalidIdentifier { value: String, character: char },
}
