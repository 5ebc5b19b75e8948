//! Single-step state upgrades.

use std::marker::PhantomData;

use azcdn_id::ResourceId;
use serde_json::Value;
use tracing::debug;

use crate::{MigrationError, RawState};

/// One schema version step for a resource type.
///
/// Upgrades never modify their input: they return a new state map or an
/// error, leaving the caller's state as it was.
pub trait StateUpgrade: Send + Sync {
    /// Short description, used in logs.
    fn name(&self) -> &'static str;

    /// Upgrades the raw attributes of one instance.
    fn upgrade(&self, state: &RawState) -> Result<RawState, MigrationError>;
}

/// Rewrites the stored `id` attribute into its canonical casing.
///
/// Older releases persisted some IDs with keywords in the wrong case (for
/// example `frontdoors` instead of `frontDoors`). The stored value is parsed
/// with [`ResourceId::parse_insensitively`] and re-formatted.
pub struct IdCasingUpgrade<T> {
    resource_type: &'static str,
    _id: PhantomData<fn() -> T>,
}

impl<T: ResourceId> IdCasingUpgrade<T> {
    pub const fn new(resource_type: &'static str) -> Self {
        Self {
            resource_type,
            _id: PhantomData,
        }
    }
}

impl<T: ResourceId> StateUpgrade for IdCasingUpgrade<T> {
    fn name(&self) -> &'static str {
        "id-casing"
    }

    fn upgrade(&self, state: &RawState) -> Result<RawState, MigrationError> {
        let old_id = state
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| MigrationError::MissingId {
                resource: self.resource_type.to_string(),
            })?;

        let new_id = T::parse_insensitively(old_id)
            .map_err(|source| MigrationError::InvalidId {
                resource: self.resource_type.to_string(),
                source,
            })?
            .id();

        debug!(
            resource_type = self.resource_type,
            old_id,
            new_id = %new_id,
            "migrating ID to correct casing"
        );

        let mut upgraded = state.clone();
        upgraded.insert("id".to_string(), Value::String(new_id));
        Ok(upgraded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azcdn_id::{FrontDoorId, IdError, ProfileId};
    use serde_json::json;

    fn state(value: Value) -> RawState {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_rewrites_legacy_casing() {
        let input = state(json!({
            "id": "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/frontdoors/fd1",
            "name": "fd1",
        }));

        let upgraded = IdCasingUpgrade::<FrontDoorId>::new("azurerm_frontdoor")
            .upgrade(&input)
            .unwrap();

        assert_eq!(
            upgraded["id"],
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/frontDoors/fd1"
        );
        assert_eq!(upgraded["name"], "fd1");
        assert!(input["id"].as_str().unwrap().contains("/frontdoors/"));
    }

    #[test]
    fn test_canonical_id_unchanged() {
        let id = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Cdn/profiles/p1";
        let input = state(json!({ "id": id }));

        let upgraded = IdCasingUpgrade::<ProfileId>::new("azurerm_cdn_profile")
            .upgrade(&input)
            .unwrap();
        assert_eq!(upgraded, input);
    }

    #[test]
    fn test_missing_id() {
        let upgrade = IdCasingUpgrade::<ProfileId>::new("azurerm_cdn_profile");

        let err = upgrade.upgrade(&state(json!({ "name": "p1" }))).unwrap_err();
        assert!(matches!(err, MigrationError::MissingId { .. }));

        let err = upgrade.upgrade(&state(json!({ "id": 42 }))).unwrap_err();
        assert!(matches!(err, MigrationError::MissingId { .. }));
    }

    #[test]
    fn test_unparsable_id() {
        let input = state(json!({ "id": "/subscriptions/sub1/resourceGroups/rg1" }));

        let err = IdCasingUpgrade::<ProfileId>::new("azurerm_cdn_profile")
            .upgrade(&input)
            .unwrap_err();
        match err {
            MigrationError::InvalidId { resource, source } => {
                assert_eq!(resource, "azurerm_cdn_profile");
                assert!(matches!(source, IdError::MissingSegment { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
