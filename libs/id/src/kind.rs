//! Runtime selection of a resource ID type.

use crate::types::*;
use crate::{Casing, IdError, IdTemplate};

macro_rules! resource_kinds {
    ( $( $variant:ident => $ty:ident, $name:literal; )+ ) => {
        /// Every resource ID type known to this crate.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum ResourceKind {
            $( $variant, )+
        }

        impl ResourceKind {
            /// All kinds, in declaration order.
            pub const ALL: &'static [ResourceKind] = &[ $( ResourceKind::$variant, )+ ];

            /// Kebab-case name, e.g. `front-door-rule`.
            pub fn name(self) -> &'static str {
                match self {
                    $( ResourceKind::$variant => $name, )+
                }
            }

            pub fn template(self) -> IdTemplate {
                match self {
                    $( ResourceKind::$variant => $ty::TEMPLATE, )+
                }
            }
        }
    };
}

resource_kinds! {
    Profile => ProfileId, "profile";
    Endpoint => EndpointId, "endpoint";
    CustomDomain => CustomDomainId, "custom-domain";
    Origin => OriginId, "origin";
    FrontDoorEndpoint => FrontDoorEndpointId, "front-door-endpoint";
    FrontDoorOriginGroup => FrontDoorOriginGroupId, "front-door-origin-group";
    FrontDoorOrigin => FrontDoorOriginId, "front-door-origin";
    FrontDoorCustomDomain => FrontDoorCustomDomainId, "front-door-custom-domain";
    FrontDoorRoute => FrontDoorRouteId, "front-door-route";
    FrontDoorRuleSet => FrontDoorRuleSetId, "front-door-rule-set";
    FrontDoorRule => FrontDoorRuleId, "front-door-rule";
    FrontDoorSecret => FrontDoorSecretId, "front-door-secret";
    FrontDoorSecurityPolicy => FrontDoorSecurityPolicyId, "front-door-security-policy";
    FrontDoorCustomDomainAssociation => FrontDoorCustomDomainAssociationId, "front-door-custom-domain-association";
    FrontDoorFirewallPolicy => FrontDoorFirewallPolicyId, "front-door-firewall-policy";
    FrontDoor => FrontDoorId, "front-door";
    BackendPool => BackendPoolId, "backend-pool";
    FrontendEndpoint => FrontendEndpointId, "frontend-endpoint";
    HealthProbe => HealthProbeId, "health-probe";
    LoadBalancing => LoadBalancingId, "load-balancing";
    RoutingRule => RoutingRuleId, "routing-rule";
    RulesEngine => RulesEngineId, "rules-engine";
    CustomHttpsConfiguration => CustomHttpsConfigurationId, "custom-https-configuration";
}

impl ResourceKind {
    /// Looks a kind up by its kebab-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Decodes `input` into `(field, value)` pairs, starting with
    /// `subscription_id` and `resource_group`.
    pub fn decode(
        self,
        input: &str,
        casing: Casing,
    ) -> Result<Vec<(&'static str, String)>, IdError> {
        let template = self.template();
        let decoded = template.decode(input, casing)?;

        let mut fields = Vec::with_capacity(decoded.values.len() + 2);
        fields.push(("subscription_id", decoded.subscription_id));
        fields.push(("resource_group", decoded.resource_group));
        fields.extend(
            template
                .segments
                .iter()
                .map(|segment| segment.field)
                .zip(decoded.values),
        );
        Ok(fields)
    }

    /// Parses insensitively and re-formats in canonical casing.
    pub fn normalize(self, input: &str) -> Result<String, IdError> {
        let template = self.template();
        let decoded = template.decode(input, Casing::Insensitive)?;
        let values: Vec<&str> = decoded.values.iter().map(String::as_str).collect();
        Ok(template.format(&decoded.subscription_id, &decoded.resource_group, &values))
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| IdError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_unique() {
        let names: std::collections::HashSet<_> =
            ResourceKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(names.len(), ResourceKind::ALL.len(), "Duplicate kind names found!");
    }

    #[test]
    fn test_kind_templates_unique() {
        let patterns: std::collections::HashSet<_> =
            ResourceKind::ALL.iter().map(|k| k.template().pattern()).collect();
        assert_eq!(patterns.len(), ResourceKind::ALL.len());
    }

    #[test]
    fn test_kind_from_str() {
        let kind: ResourceKind = "front-door-rule".parse().unwrap();
        assert_eq!(kind, ResourceKind::FrontDoorRule);
        assert_eq!(kind.to_string(), "front-door-rule");

        let err = "frontdoor-rule".parse::<ResourceKind>().unwrap_err();
        assert_eq!(err, IdError::UnknownKind("frontdoor-rule".to_string()));
    }

    #[test]
    fn test_kind_decode_fields() {
        let input = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.Cdn/profiles/profile1/secrets/secret1";
        let fields = ResourceKind::FrontDoorSecret
            .decode(input, Casing::Sensitive)
            .unwrap();
        assert_eq!(
            fields,
            vec![
                ("subscription_id", "12345678-1234-9876-4563-123456789012".to_string()),
                ("resource_group", "resGroup1".to_string()),
                ("profile_name", "profile1".to_string()),
                ("secret_name", "secret1".to_string()),
            ]
        );
    }

    #[test]
    fn test_kind_normalize_matches_typed_normalize() {
        let legacy = "/subscriptions/12345678-1234-9876-4563-123456789012/resourcegroups/resGroup1/providers/Microsoft.Network/frontdoors/fd1/backendpools/pool1";
        let normalized = ResourceKind::BackendPool.normalize(legacy).unwrap();
        assert_eq!(normalized, BackendPoolId::parse_insensitively(legacy).unwrap().id());
        assert!(BackendPoolId::parse(&normalized).is_ok());
    }
}
