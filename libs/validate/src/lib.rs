//! Field validators for CDN and Front Door resource arguments.
//!
//! Every validator takes the value and the attribute key it was read from,
//! and returns all problems found as a list of [`ValidationError`]s.
//! Validators are pure and never panic.

mod actions;
mod cidr;
mod conditions;
mod duration;
mod names;
mod url;
mod waf;

use regex::Regex;
use thiserror::Error;

pub use actions::{actions_block, CacheBehavior, RouteConfigurationOverride, RuleAction};
pub use cidr::{cidr_is_valid, cidr_overlap};
pub use conditions::{
    condition_operator, remote_address_condition, socket_address_condition, OPERATOR_ANY,
    OPERATOR_GEO_MATCH, OPERATOR_IP_MATCH,
};
pub use duration::cache_duration;
pub use names::*;
pub use url::{
    redirect_destination_fragment, redirect_destination_path, redirect_query_string,
    url_path_condition_match_value, url_rewrite_destination, url_rewrite_source_pattern,
};
pub use waf::custom_block_response_body;

/// A single validation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Attribute key the value was read from.
    pub key: String,

    /// Human-readable message, naming the key.
    pub message: String,
}

impl ValidationError {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a validator: `Ok` or every error found.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Signature shared by validators of a single string value.
pub type FieldValidator = fn(&str, &str) -> ValidationResult;

/// Single-value validators by name.
pub const FIELD_VALIDATORS: &[(&str, FieldValidator)] = &[
    ("cdn-profile-name", cdn_profile_name),
    ("cdn-endpoint-name", cdn_endpoint_name),
    ("front-door-profile-name", front_door_profile_name),
    ("front-door-endpoint-name", front_door_endpoint_name),
    ("front-door-origin-group-name", front_door_origin_group_name),
    ("front-door-origin-name", front_door_origin_name),
    ("front-door-route-name", front_door_route_name),
    ("front-door-custom-domain-name", front_door_custom_domain_name),
    ("front-door-secret-name", front_door_secret_name),
    ("front-door-security-policy-name", front_door_security_policy_name),
    ("front-door-rule-set-name", front_door_rule_set_name),
    ("front-door-rule-name", front_door_rule_name),
    ("front-door-firewall-policy-name", front_door_firewall_policy_name),
    ("front-door-name", front_door_name),
    ("front-door-child-name", front_door_child_name),
    ("cache-duration", cache_duration),
    ("redirect-destination-path", redirect_destination_path),
    ("redirect-query-string", redirect_query_string),
    ("redirect-destination-fragment", redirect_destination_fragment),
    ("url-path-condition-match-value", url_path_condition_match_value),
    ("url-rewrite-source-pattern", url_rewrite_source_pattern),
    ("url-rewrite-destination", url_rewrite_destination),
    ("cidr", cidr_is_valid),
    ("custom-block-response-body", custom_block_response_body),
];

/// Looks up a single-value validator by name.
pub fn field_validator(name: &str) -> Option<FieldValidator> {
    FIELD_VALIDATORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, validator)| *validator)
}

/// Matches `value` against an anchored pattern.
pub(crate) fn regex_match(
    value: &str,
    key: &str,
    pattern: &Regex,
    requirement: &str,
) -> ValidationResult {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(vec![ValidationError::new(
            key,
            format!("{key:?} {requirement}, got {value:?}"),
        )])
    }
}

/// Folds a list of collected errors into a result.
pub(crate) fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
