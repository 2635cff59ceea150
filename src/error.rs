//! Error types for tree construction and frequency queries

use thiserror::Error;

/// Input rejected before any tree storage is allocated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Byte outside the accepted alphabet
    #[error("invalid character '{}' (byte 0x{byte:02x}) at position {position}", char::from(*.byte).escape_default())]
    InvalidCharacter { byte: u8, position: usize },

    /// The terminator byte appears in caller-supplied text
    #[error("reserved terminator character '$' found at position {position}")]
    ReservedCharacterPresent { position: usize },
}

/// Failure of `construct`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Allocation failed while growing tree storage
    #[error("out of memory while allocating {what}")]
    ResourceExhausted { what: &'static str },
}

/// Failure of a frequency query
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("minimum substring length must be positive, got {0}")]
    InvalidMinimumLength(i64),
}
