//! # azcdn-id
//!
//! Typed Azure Resource Manager IDs for CDN and Front Door resources.
//!
//! ## Design Principles
//!
//! - Every resource type has a fixed, ordered list of path segments
//! - IDs have one canonical string form with strict, case-sensitive parsing
//! - IDs roundtrip (format → parse → format)
//! - A case-insensitive parse exists only to repair IDs that older releases
//!   persisted with the wrong keyword casing
//!
//! ## ID Format
//!
//! ```text
//! /subscriptions/{subscription_id}/resourceGroups/{resource_group}/providers/{namespace}/{key}/{value}...
//! ```
//!
//! Examples:
//! - `/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.Cdn/profiles/profile1`
//! - `/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.Network/frontDoors/frontDoor1/backendPools/pool1`

mod error;
mod kind;
mod macros;
mod template;
mod types;

pub use error::IdError;
pub use kind::ResourceKind;
pub use template::{Casing, DecodedId, IdTemplate, Segment};
pub use types::*;

#[doc(hidden)]
pub use serde;

/// Common surface of every generated resource ID type.
pub trait ResourceId: Sized + std::fmt::Display {
    /// Formats the canonical ID string.
    fn id(&self) -> String;

    /// Parses an ID whose keywords use the canonical casing.
    fn parse(input: &str) -> Result<Self, IdError>;

    /// Parses an ID ignoring keyword casing.
    fn parse_insensitively(input: &str) -> Result<Self, IdError>;

    /// Parses insensitively and re-formats in canonical casing.
    fn normalize(input: &str) -> Result<String, IdError> {
        Self::parse_insensitively(input).map(|id| id.id())
    }
}
