//! Error types for state upgrades.

use azcdn_id::IdError;
use thiserror::Error;

/// Errors that can occur while upgrading persisted state.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MigrationError {
    /// The state has no string `id` attribute.
    #[error("{resource}: state has no string `id` attribute")]
    MissingId { resource: String },

    /// The stored ID could not be parsed, even ignoring keyword casing.
    #[error("{resource}: parsing stored ID: {source}")]
    InvalidId {
        resource: String,
        #[source]
        source: IdError,
    },

    /// No upgrades are registered for the resource type.
    #[error("no state upgrades registered for resource type '{0}'")]
    UnknownResourceType(String),

    /// The stored schema version is newer than the registered one.
    #[error("unsupported schema version: {resource_type} v{version} (current v{current})")]
    UnsupportedVersion {
        resource_type: String,
        version: u64,
        current: u64,
    },

    /// The state document itself is malformed.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl MigrationError {
    /// Resource type or instance the error was raised for, if any.
    pub fn resource(&self) -> Option<&str> {
        match self {
            MigrationError::MissingId { resource } | MigrationError::InvalidId { resource, .. } => {
                Some(resource)
            }
            MigrationError::UnknownResourceType(resource_type)
            | MigrationError::UnsupportedVersion { resource_type, .. } => Some(resource_type),
            MigrationError::InvalidState(_) => None,
        }
    }
}

impl From<serde_json::Error> for MigrationError {
    fn from(err: serde_json::Error) -> Self {
        MigrationError::InvalidState(err.to_string())
    }
}
