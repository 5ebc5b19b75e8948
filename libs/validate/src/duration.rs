//! Cache duration validator.

use std::sync::LazyLock;

use regex::Regex;

use crate::{finish, ValidationError, ValidationResult};

const MAX_DAYS: u32 = 365;

/// Validates a `[d.]hh:mm:ss` cache duration.
///
/// Days run 1-365 and are omitted for durations under a day; hours run
/// 0-23, minutes and seconds 0-59. A zero duration is rejected.
pub fn cache_duration(value: &str, key: &str) -> ValidationResult {
    static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^(?:([0-9]{1,3})\.)?([0-9]{2}):([0-9]{2}):([0-9]{2})$")
            .expect("duration pattern is valid")
    });

    if value.starts_with("0.") {
        return Err(vec![ValidationError::new(
            key,
            format!("{key:?} must not be prefixed with '0.' for durations of less than one day, got {value:?}"),
        )]);
    }

    let Some(caps) = PATTERN.captures(value) else {
        return Err(vec![ValidationError::new(
            key,
            format!("{key:?} must be in the format '[d.]hh:mm:ss', got {value:?}"),
        )]);
    };

    let part = |i: usize| -> u32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    let (days, hours, minutes, seconds) = (part(1), part(2), part(3), part(4));

    let mut errors = Vec::new();
    if let Some(days_str) = caps.get(1).map(|m| m.as_str()) {
        if days_str.starts_with('0') || days > MAX_DAYS {
            errors.push(ValidationError::new(
                key,
                format!("{key:?} day component must be between 1 and {MAX_DAYS} without leading zeros, got {days_str:?}"),
            ));
        }
    }
    if hours > 23 {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} hours must be between 0 and 23, got {hours}"),
        ));
    }
    if minutes > 59 {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} minutes must be between 0 and 59, got {minutes}"),
        ));
    }
    if seconds > 59 {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} seconds must be between 0 and 59, got {seconds}"),
        ));
    }
    if errors.is_empty() && days == 0 && hours == 0 && minutes == 0 && seconds == 0 {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} must be greater than zero, got {value:?}"),
        ));
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00:00:01")]
    #[case("23:59:59")]
    #[case("1.00:00:00")]
    #[case("365.23:59:59")]
    #[case("12.12:30:00")]
    fn test_cache_duration_valid(#[case] value: &str) {
        assert!(cache_duration(value, "cache_duration").is_ok(), "{value:?}");
    }

    #[rstest]
    #[case("00:00:00")]
    #[case("0.01:00:00")]
    #[case("0.00:00:00")]
    #[case("366.00:00:00")]
    #[case("01.00:00:00")]
    #[case("24:00:00")]
    #[case("00:60:00")]
    #[case("00:00:60")]
    #[case("1:00:00")]
    #[case("1.")]
    #[case("")]
    #[case("P1D")]
    fn test_cache_duration_invalid(#[case] value: &str) {
        assert!(cache_duration(value, "cache_duration").is_err(), "{value:?}");
    }

    #[test]
    fn test_cache_duration_collects_range_errors() {
        let errors = cache_duration("99:99:99", "cache_duration").unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_cache_duration_zero_prefix_message() {
        let errors = cache_duration("0.12:00:00", "cache_duration").unwrap_err();
        assert!(errors[0].message.contains("'0.'"));
    }
}
