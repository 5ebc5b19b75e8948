//! Rule `actions` block checks.

use std::fmt;

use crate::{cache_duration, finish, ValidationError, ValidationResult};

const ACTIONS: &str = "actions";
const ROUTE_CONFIGURATION_OVERRIDE: &str = "route_configuration_override_action";
const MAX_ACTIONS: usize = 5;

/// Cache behaviour of a route configuration override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBehavior {
    HonorOrigin,
    OverrideAlways,
    OverrideIfOriginMissing,
    Disabled,
}

impl fmt::Display for CacheBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::HonorOrigin => "HonorOrigin",
            Self::OverrideAlways => "OverrideAlways",
            Self::OverrideIfOriginMissing => "OverrideIfOriginMissing",
            Self::Disabled => "Disabled",
        };
        f.write_str(s)
    }
}

/// Route configuration override action, as far as validation needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteConfigurationOverride {
    pub cache_behavior: Option<CacheBehavior>,
    pub cache_duration: Option<String>,
    pub query_string_caching_behavior: Option<String>,
    pub compression_enabled: bool,
}

/// One entry of a rule's `actions` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    UrlRedirect,
    UrlRewrite,
    RequestHeader,
    ResponseHeader,
    RouteConfigurationOverride(RouteConfigurationOverride),
}

impl RuleAction {
    pub fn config_name(&self) -> &'static str {
        match self {
            Self::UrlRedirect => "url_redirect_action",
            Self::UrlRewrite => "url_rewrite_action",
            Self::RequestHeader => "request_header_action",
            Self::ResponseHeader => "response_header_action",
            Self::RouteConfigurationOverride(_) => ROUTE_CONFIGURATION_OVERRIDE,
        }
    }

    fn single_use(&self) -> bool {
        !matches!(self, Self::RequestHeader | Self::ResponseHeader)
    }
}

/// Validates the full list of actions on a rule.
pub fn actions_block(actions: &[RuleAction]) -> ValidationResult {
    let mut errors = Vec::new();

    if actions.is_empty() {
        errors.push(ValidationError::new(
            ACTIONS,
            format!("{ACTIONS:?} must contain at least one action"),
        ));
    }
    if actions.len() > MAX_ACTIONS {
        errors.push(ValidationError::new(
            ACTIONS,
            format!(
                "{ACTIONS:?} may only contain up to {MAX_ACTIONS} actions, got {}",
                actions.len()
            ),
        ));
    }

    for (i, action) in actions.iter().enumerate() {
        let first = actions.iter().position(|other| other.config_name() == action.config_name());
        if action.single_use() && first == Some(i) {
            let count = actions
                .iter()
                .filter(|other| other.config_name() == action.config_name())
                .count();
            if count > 1 {
                errors.push(ValidationError::new(
                    ACTIONS,
                    format!(
                        "{ACTIONS:?} may only contain one {:?}, got {count}",
                        action.config_name()
                    ),
                ));
            }
        }
    }

    let has_redirect = actions.contains(&RuleAction::UrlRedirect);
    let has_rewrite = actions.contains(&RuleAction::UrlRewrite);
    if has_redirect && has_rewrite {
        errors.push(ValidationError::new(
            ACTIONS,
            format!("{ACTIONS:?} must not contain both a \"url_redirect_action\" and a \"url_rewrite_action\""),
        ));
    }

    for action in actions {
        if let RuleAction::RouteConfigurationOverride(route) = action {
            route_configuration_override(route, &mut errors);
        }
    }

    finish(errors)
}

fn route_configuration_override(route: &RouteConfigurationOverride, errors: &mut Vec<ValidationError>) {
    let key = ROUTE_CONFIGURATION_OVERRIDE;
    let Some(behavior) = route.cache_behavior else {
        return;
    };
    let duration = route.cache_duration.as_deref().filter(|d| !d.is_empty());

    match behavior {
        CacheBehavior::HonorOrigin => {
            if duration.is_some() {
                errors.push(ValidationError::new(
                    key,
                    format!("{key:?} is invalid: if the 'cache_behavior' is set to '{behavior}' you cannot define the 'cache_duration'"),
                ));
            }
        }
        CacheBehavior::OverrideAlways | CacheBehavior::OverrideIfOriginMissing => match duration {
            Some(duration) => {
                if let Err(mut found) = cache_duration(duration, "cache_duration") {
                    errors.append(&mut found);
                }
            }
            None => errors.push(ValidationError::new(
                key,
                format!("{key:?} is invalid: if the 'cache_behavior' is set to '{behavior}' the 'cache_duration' must be set"),
            )),
        },
        CacheBehavior::Disabled => {
            if route
                .query_string_caching_behavior
                .as_deref()
                .is_some_and(|q| !q.is_empty())
            {
                errors.push(ValidationError::new(
                    key,
                    format!("{key:?} is invalid: if the 'cache_behavior' is set to '{behavior}' you cannot define the 'query_string_caching_behavior'"),
                ));
            }
            if route.compression_enabled {
                errors.push(ValidationError::new(
                    key,
                    format!("{key:?} is invalid: if the 'cache_behavior' is set to '{behavior}' you cannot enable 'compression_enabled'"),
                ));
            }
            if duration.is_some() {
                errors.push(ValidationError::new(
                    key,
                    format!("{key:?} is invalid: if the 'cache_behavior' is set to '{behavior}' you cannot define the 'cache_duration'"),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(behavior: CacheBehavior, duration: Option<&str>) -> RuleAction {
        RuleAction::RouteConfigurationOverride(RouteConfigurationOverride {
            cache_behavior: Some(behavior),
            cache_duration: duration.map(str::to_string),
            ..Default::default()
        })
    }

    #[test]
    fn test_action_count() {
        assert!(actions_block(&[]).is_err());
        assert!(actions_block(&[RuleAction::RequestHeader]).is_ok());

        let six = vec![RuleAction::RequestHeader; 6];
        let errors = actions_block(&six).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("up to 5"));
    }

    #[test]
    fn test_redirect_and_rewrite_exclusive() {
        assert!(actions_block(&[RuleAction::UrlRedirect, RuleAction::RequestHeader]).is_ok());
        let errors = actions_block(&[RuleAction::UrlRedirect, RuleAction::UrlRewrite]).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_single_use_actions() {
        let errors = actions_block(&[RuleAction::UrlRewrite, RuleAction::UrlRewrite]).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("url_rewrite_action"));

        assert!(actions_block(&[RuleAction::ResponseHeader, RuleAction::ResponseHeader]).is_ok());
    }

    #[test]
    fn test_honor_origin_forbids_duration() {
        assert!(actions_block(&[route(CacheBehavior::HonorOrigin, None)]).is_ok());
        assert!(actions_block(&[route(CacheBehavior::HonorOrigin, Some("1.00:00:00"))]).is_err());
    }

    #[test]
    fn test_override_requires_valid_duration() {
        for behavior in [CacheBehavior::OverrideAlways, CacheBehavior::OverrideIfOriginMissing] {
            assert!(actions_block(&[route(behavior, Some("1.00:00:00"))]).is_ok());
            assert!(actions_block(&[route(behavior, None)]).is_err());
            assert!(actions_block(&[route(behavior, Some(""))]).is_err());

            let errors = actions_block(&[route(behavior, Some("0.01:00:00"))]).unwrap_err();
            assert_eq!(errors[0].key, "cache_duration");
        }
    }

    #[test]
    fn test_disabled_caching() {
        assert!(actions_block(&[route(CacheBehavior::Disabled, None)]).is_ok());

        let action = RuleAction::RouteConfigurationOverride(RouteConfigurationOverride {
            cache_behavior: Some(CacheBehavior::Disabled),
            cache_duration: Some("00:10:00".to_string()),
            query_string_caching_behavior: Some("IgnoreQueryString".to_string()),
            compression_enabled: true,
        });
        let errors = actions_block(&[action]).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.key == "route_configuration_override_action"));
    }
}
