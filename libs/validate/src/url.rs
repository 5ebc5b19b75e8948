//! URL redirect, rewrite and path condition validators.

use crate::{finish, ValidationError, ValidationResult};

const MAX_PATH_LEN: usize = 2048;
const MAX_QUERY_STRING_LEN: usize = 2048;
const MAX_FRAGMENT_LEN: usize = 1024;

/// Redirect destination path. Empty keeps the incoming path.
pub fn redirect_destination_path(value: &str, key: &str) -> ValidationResult {
    if value.is_empty() {
        return Ok(());
    }

    let mut errors = Vec::new();
    if !value.starts_with('/') {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} must begin with a '/', got {value:?}"),
        ));
    }
    if value.len() > MAX_PATH_LEN {
        errors.push(too_long(key, MAX_PATH_LEN, value.len()));
    }
    finish(errors)
}

/// Redirect query string: `key=value` pairs joined by `&`, without the
/// leading `?`. Empty keeps the incoming query string.
pub fn redirect_query_string(value: &str, key: &str) -> ValidationResult {
    if value.is_empty() {
        return Ok(());
    }

    let mut errors = Vec::new();
    if value.len() > MAX_QUERY_STRING_LEN {
        errors.push(too_long(key, MAX_QUERY_STRING_LEN, value.len()));
    }
    if value.starts_with('?') {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} must not begin with a '?', got {value:?}"),
        ));
    }
    if value.starts_with('&') {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} must not begin with a '&', got {value:?}"),
        ));
    }
    if value.ends_with('&') {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} must not end with a '&', got {value:?}"),
        ));
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    for pair in value.split('&') {
        match pair.split_once('=') {
            Some((name, _)) if !name.is_empty() => {}
            _ => errors.push(ValidationError::new(
                key,
                format!("{key:?} must contain only 'key=value' pairs separated by '&', got {pair:?} in {value:?}"),
            )),
        }
    }
    finish(errors)
}

/// Redirect destination fragment, without the leading `#`. Empty keeps the
/// incoming fragment.
pub fn redirect_destination_fragment(value: &str, key: &str) -> ValidationResult {
    let mut errors = Vec::new();
    if value.starts_with('#') {
        errors.push(ValidationError::new(
            key,
            format!("{key:?} must not begin with a '#', got {value:?}"),
        ));
    }
    if value.len() > MAX_FRAGMENT_LEN {
        errors.push(too_long(key, MAX_FRAGMENT_LEN, value.len()));
    }
    finish(errors)
}

/// Match value of a URL path condition; the service strips the leading `/`.
pub fn url_path_condition_match_value(value: &str, key: &str) -> ValidationResult {
    if value.starts_with('/') {
        return Err(vec![ValidationError::new(
            key,
            format!("{key:?} must not begin with a '/', got {value:?}"),
        )]);
    }
    Ok(())
}

pub fn url_rewrite_source_pattern(value: &str, key: &str) -> ValidationResult {
    must_begin_with_slash(value, key)
}

pub fn url_rewrite_destination(value: &str, key: &str) -> ValidationResult {
    must_begin_with_slash(value, key)
}

fn must_begin_with_slash(value: &str, key: &str) -> ValidationResult {
    if !value.starts_with('/') {
        return Err(vec![ValidationError::new(
            key,
            format!("{key:?} must begin with a '/', got {value:?}"),
        )]);
    }
    Ok(())
}

fn too_long(key: &str, max: usize, actual: usize) -> ValidationError {
    ValidationError::new(
        key,
        format!("{key:?} must be at most {max} characters in length, got {actual}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true)]
    #[case("/", true)]
    #[case("/images/logo.png", true)]
    #[case("images", false)]
    fn test_redirect_destination_path(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(
            redirect_destination_path(value, "destination_path").is_ok(),
            ok,
            "{value:?}"
        );
    }

    #[test]
    fn test_redirect_destination_path_length() {
        let value = format!("/{}", "a".repeat(MAX_PATH_LEN));
        assert!(redirect_destination_path(&value, "destination_path").is_err());
    }

    #[rstest]
    #[case("", true)]
    #[case("a=b", true)]
    #[case("a=b&c=d", true)]
    #[case("a=", true)]
    #[case("a=b=c", true)]
    #[case("?a=b", false)]
    #[case("&a=b", false)]
    #[case("a=b&", false)]
    #[case("a", false)]
    #[case("=b", false)]
    #[case("a=b&&c=d", false)]
    fn test_redirect_query_string(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(
            redirect_query_string(value, "query_string").is_ok(),
            ok,
            "{value:?}"
        );
    }

    #[test]
    fn test_redirect_query_string_reports_each_bad_pair() {
        let errors = redirect_query_string("a&b&c=d", "query_string").unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[rstest]
    #[case("", true)]
    #[case("section", true)]
    #[case("#section", false)]
    fn test_redirect_destination_fragment(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(
            redirect_destination_fragment(value, "destination_fragment").is_ok(),
            ok,
            "{value:?}"
        );
    }

    #[test]
    fn test_url_path_condition_match_value() {
        assert!(url_path_condition_match_value("images/", "match_values").is_ok());
        assert!(url_path_condition_match_value("/images/", "match_values").is_err());
    }

    #[test]
    fn test_url_rewrite() {
        assert!(url_rewrite_source_pattern("/old", "source_pattern").is_ok());
        assert!(url_rewrite_source_pattern("old", "source_pattern").is_err());
        assert!(url_rewrite_destination("/new", "destination").is_ok());
        assert!(url_rewrite_destination("", "destination").is_err());
    }
}
