//! Resource name validators.

use std::sync::LazyLock;

use regex::Regex;

use crate::{regex_match, ValidationError, ValidationResult};

/// Defines a validator matching one anchored pattern.
macro_rules! name_validator {
    ($(#[$meta:meta])* $name:ident, $pattern:literal, $requirement:literal) => {
        $(#[$meta])*
        pub fn $name(value: &str, key: &str) -> ValidationResult {
            static PATTERN: LazyLock<Regex> =
                LazyLock::new(|| Regex::new($pattern).expect("name pattern is valid"));
            regex_match(value, key, &PATTERN, $requirement)
        }
    };
}

// =============================================================================
// CDN (classic)
// =============================================================================

name_validator!(
    cdn_profile_name,
    r"^[0-9a-zA-Z](?:[-0-9a-zA-Z]{0,258}[0-9a-zA-Z])?$",
    "must be between 1 and 260 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

/// Endpoint names become part of `{name}.azureedge.net`.
pub fn cdn_endpoint_name(value: &str, key: &str) -> ValidationResult {
    static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[a-zA-Z0-9]+(?:-*[a-zA-Z0-9])*$").expect("name pattern is valid")
    });

    let mut errors = Vec::new();
    if value.is_empty() || value.len() > 50 {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} must be between 1 and 50 characters in length, got {value:?}"),
        ));
    }
    if let Err(mut found) = regex_match(
        value,
        key,
        &PATTERN,
        "may contain only letters, numbers and hyphens, and must begin and end with a letter or number",
    ) {
        errors.append(&mut found);
    }
    crate::finish(errors)
}

// =============================================================================
// Front Door (Standard/Premium)
// =============================================================================

name_validator!(
    front_door_profile_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,258}[0-9a-zA-Z]$",
    "must be between 2 and 260 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    /// Endpoint names become part of `{name}-{hash}.z01.azurefd.net`.
    front_door_endpoint_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,44}[0-9a-zA-Z]$",
    "must be between 2 and 46 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    front_door_origin_group_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,88}[0-9a-zA-Z]$",
    "must be between 2 and 90 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    front_door_origin_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,88}[0-9a-zA-Z]$",
    "must be between 2 and 90 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    front_door_route_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,88}[0-9a-zA-Z]$",
    "must be between 2 and 90 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    front_door_custom_domain_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,258}[0-9a-zA-Z]$",
    "must be between 2 and 260 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    front_door_secret_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,258}[0-9a-zA-Z]$",
    "must be between 2 and 260 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    front_door_security_policy_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{0,258}[0-9a-zA-Z]$",
    "must be between 2 and 260 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    front_door_rule_set_name,
    r"^[a-zA-Z][0-9a-zA-Z]{0,59}$",
    "must be between 1 and 60 characters in length, begin with a letter and may contain only letters and numbers"
);

name_validator!(
    front_door_rule_name,
    r"^[a-zA-Z][0-9a-zA-Z]{0,259}$",
    "must be between 1 and 260 characters in length, begin with a letter and may contain only letters and numbers"
);

name_validator!(
    /// Also used for Front Door (classic) WAF policies.
    front_door_firewall_policy_name,
    r"^[a-zA-Z][0-9a-zA-Z]{0,127}$",
    "must be between 1 and 128 characters in length, begin with a letter and may contain only letters and numbers"
);

// =============================================================================
// Front Door (classic)
// =============================================================================

name_validator!(
    front_door_name,
    r"^[0-9a-zA-Z][-0-9a-zA-Z]{3,62}[0-9a-zA-Z]$",
    "must be between 5 and 64 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);

name_validator!(
    /// Backend pools, frontend endpoints, health probes, load balancing
    /// settings, routing rules and rules engines.
    front_door_child_name,
    r"^[0-9a-zA-Z](?:[-0-9a-zA-Z]{0,88}[0-9a-zA-Z])?$",
    "must be between 1 and 90 characters in length, begin with a letter or number, end with a letter or number and may contain only letters, numbers or hyphens"
);
