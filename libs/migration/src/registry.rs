//! Registered upgrade chains per Terraform resource type.

use std::collections::BTreeMap;

use azcdn_id::{
    CustomDomainId, CustomHttpsConfigurationId, EndpointId, FrontDoorFirewallPolicyId,
    FrontDoorId, ProfileId, ResourceId, RulesEngineId,
};
use tracing::debug;

use crate::{IdCasingUpgrade, MigrationError, RawState, StateUpgrade};

/// Ordered upgrade steps for one resource type.
///
/// `steps[n]` upgrades state from schema version `n` to `n + 1`, so the
/// current schema version is the number of steps.
struct UpgradeChain {
    steps: Vec<Box<dyn StateUpgrade>>,
}

impl UpgradeChain {
    fn schema_version(&self) -> u64 {
        self.steps.len() as u64
    }
}

/// Registry of state upgrades keyed by Terraform resource type.
#[derive(Default)]
pub struct UpgradeRegistry {
    chains: BTreeMap<&'static str, UpgradeChain>,
}

impl UpgradeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in upgrade.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register_id_casing::<ProfileId>("azurerm_cdn_profile")
            .register_id_casing::<EndpointId>("azurerm_cdn_endpoint")
            .register_id_casing::<CustomDomainId>("azurerm_cdn_endpoint_custom_domain")
            .register_id_casing::<FrontDoorId>("azurerm_frontdoor")
            .register_id_casing::<FrontDoorFirewallPolicyId>("azurerm_frontdoor_firewall_policy")
            .register_id_casing::<FrontDoorFirewallPolicyId>(
                "azurerm_cdn_frontdoor_firewall_policy",
            )
            .register_id_casing::<CustomHttpsConfigurationId>(
                "azurerm_frontdoor_custom_https_configuration",
            )
            .register_id_casing::<RulesEngineId>("azurerm_frontdoor_rules_engine");
        registry
    }

    /// Appends an upgrade step to a resource type's chain, bumping its
    /// schema version by one.
    pub fn register(
        &mut self,
        resource_type: &'static str,
        step: Box<dyn StateUpgrade>,
    ) -> &mut Self {
        self.chains
            .entry(resource_type)
            .or_insert_with(|| UpgradeChain { steps: Vec::new() })
            .steps
            .push(step);
        self
    }

    fn register_id_casing<T: ResourceId + 'static>(
        &mut self,
        resource_type: &'static str,
    ) -> &mut Self {
        self.register(resource_type, Box::new(IdCasingUpgrade::<T>::new(resource_type)))
    }

    /// Current schema version of a resource type, if it has upgrades.
    pub fn schema_version(&self, resource_type: &str) -> Option<u64> {
        self.chains.get(resource_type).map(UpgradeChain::schema_version)
    }

    /// Resource types with registered upgrades, sorted.
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.chains.keys().copied()
    }

    /// Upgrades one instance's attributes from `schema_version` to the
    /// current version of `resource_type`.
    ///
    /// State already at the current version is returned unchanged.
    pub fn upgrade_instance(
        &self,
        resource_type: &str,
        schema_version: u64,
        state: &RawState,
    ) -> Result<RawState, MigrationError> {
        let chain = self
            .chains
            .get(resource_type)
            .ok_or_else(|| MigrationError::UnknownResourceType(resource_type.to_string()))?;

        let current = chain.schema_version();
        if schema_version > current {
            return Err(MigrationError::UnsupportedVersion {
                resource_type: resource_type.to_string(),
                version: schema_version,
                current,
            });
        }

        let mut upgraded = state.clone();
        for (version, step) in (schema_version..).zip(&chain.steps[schema_version as usize..]) {
            debug!(
                resource_type,
                from = version,
                to = version + 1,
                step = step.name(),
                "running state upgrade"
            );
            upgraded = step.upgrade(&upgraded)?;
        }
        Ok(upgraded)
    }
}

impl std::fmt::Debug for UpgradeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.chains.iter().map(|(k, chain)| (k, chain.schema_version())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn state(value: Value) -> RawState {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_builtin_registry() {
        let registry = UpgradeRegistry::builtin();
        let types: Vec<_> = registry.resource_types().collect();
        assert_eq!(types.len(), 8);
        assert!(types.contains(&"azurerm_frontdoor"));
        assert!(types.contains(&"azurerm_cdn_frontdoor_firewall_policy"));

        for resource_type in types {
            assert_eq!(registry.schema_version(resource_type), Some(1));
        }
        assert_eq!(registry.schema_version("azurerm_resource_group"), None);
    }

    #[test]
    fn test_upgrade_from_zero() {
        let registry = UpgradeRegistry::builtin();
        let input = state(json!({
            "id": "/subscriptions/sub1/resourcegroups/rg1/providers/Microsoft.Network/FrontDoorWebApplicationFirewallPolicies/policy1",
        }));

        let upgraded = registry
            .upgrade_instance("azurerm_frontdoor_firewall_policy", 0, &input)
            .unwrap();
        assert_eq!(
            upgraded["id"],
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/frontDoorWebApplicationFirewallPolicies/policy1"
        );
    }

    #[test]
    fn test_current_version_unchanged() {
        let registry = UpgradeRegistry::builtin();
        let input = state(json!({ "id": "not an id" }));

        let upgraded = registry
            .upgrade_instance("azurerm_cdn_profile", 1, &input)
            .unwrap();
        assert_eq!(upgraded, input);
    }

    #[test]
    fn test_unknown_resource_type() {
        let registry = UpgradeRegistry::builtin();
        let err = registry
            .upgrade_instance("azurerm_storage_account", 0, &RawState::new())
            .unwrap_err();
        assert_eq!(
            err,
            MigrationError::UnknownResourceType("azurerm_storage_account".to_string())
        );
    }

    #[test]
    fn test_future_version_rejected() {
        let registry = UpgradeRegistry::builtin();
        let err = registry
            .upgrade_instance("azurerm_cdn_profile", 2, &RawState::new())
            .unwrap_err();
        assert!(matches!(
            err,
            MigrationError::UnsupportedVersion {
                version: 2,
                current: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_steps_run_in_order() {
        struct Append(&'static str);

        impl StateUpgrade for Append {
            fn name(&self) -> &'static str {
                self.0
            }

            fn upgrade(&self, state: &RawState) -> Result<RawState, MigrationError> {
                let mut out = state.clone();
                let trail = out
                    .get("trail")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                out.insert("trail".to_string(), Value::String(trail + self.0));
                Ok(out)
            }
        }

        let mut registry = UpgradeRegistry::new();
        registry
            .register("test_resource", Box::new(Append("a")))
            .register("test_resource", Box::new(Append("b")))
            .register("test_resource", Box::new(Append("c")));

        assert_eq!(registry.schema_version("test_resource"), Some(3));

        let from_zero = registry
            .upgrade_instance("test_resource", 0, &RawState::new())
            .unwrap();
        assert_eq!(from_zero["trail"], "abc");

        let from_two = registry
            .upgrade_instance("test_resource", 2, &RawState::new())
            .unwrap();
        assert_eq!(from_two["trail"], "c");
    }
}
