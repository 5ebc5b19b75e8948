//! Error types for resource ID parsing.

use thiserror::Error;

/// Errors that can occur when parsing a resource ID.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The ID string is empty.
    #[error("ID cannot be empty")]
    Empty,

    /// The ID is not an ARM path at all.
    #[error("parsing Azure ID: {message}")]
    InvalidFormat { message: String },

    /// An expected literal keyword was not found at its position.
    #[error("ID was missing the `{key}` element")]
    MissingSegment { key: &'static str },

    /// A keyword was present but its value was empty.
    #[error("ID contained an empty value for the `{key}` element")]
    EmptySegment { key: &'static str },

    /// The provider namespace did not match the resource type.
    #[error("ID has provider namespace '{actual}', expected '{expected}'")]
    ProviderMismatch {
        expected: &'static str,
        actual: String,
    },

    /// Segments were left over after every expected segment was consumed.
    #[error("ID contained more segments than required: '{remaining}'")]
    UnexpectedSegments { remaining: String },

    /// No resource kind has this name.
    #[error("unknown resource kind '{0}'")]
    UnknownKind(String),
}

impl IdError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdError::Empty)
    }

    /// Returns true if a keyword (or the provider namespace) was absent or misplaced.
    pub fn is_missing_segment(&self) -> bool {
        matches!(
            self,
            IdError::MissingSegment { .. } | IdError::ProviderMismatch { .. }
        )
    }
}
