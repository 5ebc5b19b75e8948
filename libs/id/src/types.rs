//! Resource ID definitions for CDN and Front Door resources.
//!
//! Each ID type lists its provider namespace and the keyword/field pairs
//! that follow it, outermost first.

use crate::define_resource_id;

// =============================================================================
// CDN (classic)
// =============================================================================

define_resource_id! {
    /// A CDN or Front Door Standard/Premium profile.
    ProfileId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => name,
        },
    }
}

define_resource_id! {
    /// A CDN (classic) endpoint.
    EndpointId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "endpoints" => name,
        },
    }
}

define_resource_id! {
    /// A custom domain bound to a CDN (classic) endpoint.
    CustomDomainId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "endpoints" => endpoint_name,
            "customDomains" => name,
        },
    }
}

define_resource_id! {
    /// An origin of a CDN (classic) endpoint.
    OriginId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "endpoints" => endpoint_name,
            "origins" => name,
        },
    }
}

// =============================================================================
// Front Door (Standard/Premium)
// =============================================================================

define_resource_id! {
    FrontDoorEndpointId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "afdEndpoints" => afd_endpoint_name,
        },
    }
}

define_resource_id! {
    FrontDoorOriginGroupId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "originGroups" => origin_group_name,
        },
    }
}

define_resource_id! {
    FrontDoorOriginId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "originGroups" => origin_group_name,
            "origins" => origin_name,
        },
    }
}

define_resource_id! {
    FrontDoorCustomDomainId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "customDomains" => custom_domain_name,
        },
    }
}

define_resource_id! {
    FrontDoorRouteId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "afdEndpoints" => afd_endpoint_name,
            "routes" => route_name,
        },
    }
}

define_resource_id! {
    FrontDoorRuleSetId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "ruleSets" => rule_set_name,
        },
    }
}

define_resource_id! {
    FrontDoorRuleId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "ruleSets" => rule_set_name,
            "rules" => rule_name,
        },
    }
}

define_resource_id! {
    /// A certificate secret stored on a Front Door profile.
    FrontDoorSecretId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "secrets" => secret_name,
        },
    }
}

define_resource_id! {
    FrontDoorSecurityPolicyId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "securityPolicies" => security_policy_name,
        },
    }
}

define_resource_id! {
    /// Association between a custom domain and the routes that serve it.
    FrontDoorCustomDomainAssociationId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "associations" => association_name,
        },
    }
}

// =============================================================================
// Web Application Firewall
// =============================================================================

define_resource_id! {
    /// A Front Door WAF policy. Shared by Front Door classic and Standard/Premium.
    FrontDoorFirewallPolicyId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoorWebApplicationFirewallPolicies" => firewall_policy_name,
        },
    }
}

// =============================================================================
// Front Door (classic)
// =============================================================================

define_resource_id! {
    /// A Front Door (classic). Older releases stored this as `frontdoors`.
    FrontDoorId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => name,
        },
    }
}

define_resource_id! {
    BackendPoolId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => front_door_name,
            "backendPools" => name,
        },
    }
}

define_resource_id! {
    FrontendEndpointId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => front_door_name,
            "frontendEndpoints" => name,
        },
    }
}

define_resource_id! {
    HealthProbeId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => front_door_name,
            "healthProbeSettings" => name,
        },
    }
}

define_resource_id! {
    LoadBalancingId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => front_door_name,
            "loadBalancingSettings" => name,
        },
    }
}

define_resource_id! {
    RoutingRuleId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => front_door_name,
            "routingRules" => name,
        },
    }
}

define_resource_id! {
    RulesEngineId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => front_door_name,
            "rulesEngines" => name,
        },
    }
}

define_resource_id! {
    /// HTTPS settings of a Front Door (classic) frontend endpoint.
    CustomHttpsConfigurationId {
        provider: "Microsoft.Network",
        segments: {
            "frontDoors" => front_door_name,
            "customHttpsConfiguration" => name,
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
