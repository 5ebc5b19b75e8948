//! Rule condition operator and match value checks.

use std::sync::LazyLock;

use regex::Regex;

use crate::{cidr_is_valid, cidr_overlap, finish, ValidationError, ValidationResult};

pub const OPERATOR_ANY: &str = "Any";
pub const OPERATOR_IP_MATCH: &str = "IPMatch";
pub const OPERATOR_GEO_MATCH: &str = "GeoMatch";

const MATCH_VALUES: &str = "match_values";

/// Checks that `match_values` is set exactly when the operator needs it.
///
/// `Any` matches every request and takes no values; every other operator
/// requires at least one.
pub fn condition_operator<S: AsRef<str>>(
    condition: &str,
    operator: &str,
    match_values: &[S],
) -> ValidationResult {
    if operator.is_empty() {
        return Err(vec![ValidationError::new(
            condition,
            format!("{condition:?} is invalid: no 'operator' value has been set"),
        )]);
    }

    if operator == OPERATOR_ANY && !match_values.is_empty() {
        return Err(vec![ValidationError::new(
            condition,
            format!("{condition:?} is invalid: the 'match_values' field must not be set if the conditions 'operator' is set to 'Any'"),
        )]);
    }

    if operator != OPERATOR_ANY && match_values.is_empty() {
        return Err(vec![ValidationError::new(
            condition,
            format!("{condition:?} is invalid: the 'match_values' field must be set if the conditions 'operator' is not set to 'Any'"),
        )]);
    }

    Ok(())
}

/// Remote address condition: `Any`, `IPMatch` over CIDRs or `GeoMatch`
/// over ISO country codes.
pub fn remote_address_condition<S: AsRef<str>>(
    operator: &str,
    match_values: &[S],
) -> ValidationResult {
    const CONDITION: &str = "remote_address_condition";

    condition_operator(CONDITION, operator, match_values)?;

    match operator {
        OPERATOR_IP_MATCH => ip_match_values(CONDITION, match_values),
        OPERATOR_GEO_MATCH => geo_match_values(CONDITION, match_values),
        OPERATOR_ANY => Ok(()),
        other => Err(vec![unsupported_operator(
            CONDITION,
            other,
            &[OPERATOR_ANY, OPERATOR_IP_MATCH, OPERATOR_GEO_MATCH],
        )]),
    }
}

/// Socket address condition: `Any` or `IPMatch` over CIDRs.
pub fn socket_address_condition<S: AsRef<str>>(
    operator: &str,
    match_values: &[S],
) -> ValidationResult {
    const CONDITION: &str = "socket_address_condition";

    condition_operator(CONDITION, operator, match_values)?;

    match operator {
        OPERATOR_IP_MATCH => ip_match_values(CONDITION, match_values),
        OPERATOR_ANY => Ok(()),
        other => Err(vec![unsupported_operator(
            CONDITION,
            other,
            &[OPERATOR_ANY, OPERATOR_IP_MATCH],
        )]),
    }
}

fn ip_match_values<S: AsRef<str>>(condition: &str, match_values: &[S]) -> ValidationResult {
    let mut errors = Vec::new();
    for value in match_values {
        let value = value.as_ref();
        if cidr_is_valid(value, MATCH_VALUES).is_err() {
            errors.push(ValidationError::new(
                condition,
                format!("{condition:?} is invalid: when the 'operator' is set to 'IPMatch' the 'match_values' must be a valid IPv4 or IPv6 CIDR, got {value:?}"),
            ));
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    cidr_overlap(match_values, MATCH_VALUES)
}

fn geo_match_values<S: AsRef<str>>(condition: &str, match_values: &[S]) -> ValidationResult {
    static COUNTRY_CODE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Z]{2}$").expect("country code pattern is valid"));

    let errors = match_values
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|value| !COUNTRY_CODE.is_match(value))
        .map(|value| {
            ValidationError::new(
                condition,
                format!("{condition:?} is invalid: when the 'operator' is set to 'GeoMatch' the value must be a valid country code consisting of 2 uppercase characters, got {value:?}"),
            )
        })
        .collect();
    finish(errors)
}

fn unsupported_operator(condition: &str, operator: &str, supported: &[&str]) -> ValidationError {
    ValidationError::new(
        condition,
        format!(
            "{condition:?} is invalid: the 'operator' must be one of {}, got {operator:?}",
            supported.join(", ")
        ),
    )
}
