//! CIDR validity and overlap checks for IP match conditions.

use azcdn_networking::{IpFamily, IpPrefix};

use crate::{finish, ValidationError, ValidationResult};

/// Validates a single IPv4 or IPv6 CIDR.
pub fn cidr_is_valid(value: &str, key: &str) -> ValidationResult {
    match IpPrefix::from_cidr(value) {
        Ok(_) => Ok(()),
        Err(err) => Err(vec![ValidationError::new(
            key,
            format!("{key:?} must be a valid IPv4 or IPv6 CIDR, got {value:?}: {err}"),
        )]),
    }
}

/// Rejects duplicate or overlapping CIDRs within a list.
///
/// IPv4 and IPv6 entries are compared only against their own family.
pub fn cidr_overlap<S: AsRef<str>>(values: &[S], key: &str) -> ValidationResult {
    let (v4, v6): (Vec<&str>, Vec<&str>) = values
        .iter()
        .map(AsRef::<str>::as_ref)
        .partition(|value| IpFamily::of_str(value) == IpFamily::V4);

    let mut errors = Vec::new();
    check_family(&v4, key, &mut errors);
    check_family(&v6, key, &mut errors);
    finish(errors)
}

fn check_family(values: &[&str], key: &str, errors: &mut Vec<ValidationError>) {
    let mut parsed: Vec<(&str, IpPrefix)> = Vec::with_capacity(values.len());

    for (i, value) in values.iter().enumerate() {
        if values[..i].contains(value) {
            errors.push(ValidationError::new(
                key,
                format!("{key:?} contains the duplicate CIDR {value:?}"),
            ));
            continue;
        }

        match IpPrefix::from_cidr(value) {
            Ok(prefix) => parsed.push((*value, prefix)),
            Err(err) => errors.push(ValidationError::new(
                key,
                format!("{key:?} must contain only valid CIDRs, got {value:?}: {err}"),
            )),
        }
    }

    for (i, (a_str, a)) in parsed.iter().enumerate() {
        for (b_str, b) in &parsed[i + 1..] {
            if !a.overlaps(b) {
                continue;
            }
            let (narrow, wide) = if a.prefix_len >= b.prefix_len {
                (a_str, b_str)
            } else {
                (b_str, a_str)
            };
            errors.push(ValidationError::new(
                key,
                format!("{key:?} CIDR {narrow:?} overlaps with CIDR {wide:?}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("192.168.0.1/24", true)]
    #[case("10.0.0.0/8", true)]
    #[case("0.0.0.0/0", true)]
    #[case("2001:db8::/32", true)]
    #[case("::/0", true)]
    #[case("192.168.0.1", false)]
    #[case("192.168.0.1/33", false)]
    #[case("2001:db8::/129", false)]
    #[case("not-a-cidr", false)]
    fn test_cidr_is_valid(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(cidr_is_valid(value, "match_values").is_ok(), ok, "{value:?}");
    }

    #[test]
    fn test_duplicate() {
        let errors = cidr_overlap(&["192.168.0.1/24", "192.168.0.1/24"], "match_values").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("duplicate"));
    }

    #[test]
    fn test_no_overlap() {
        assert!(cidr_overlap(&["192.168.0.1/24", "192.168.1.1/24"], "match_values").is_ok());
    }

    #[test]
    fn test_overlap_either_order() {
        for values in [
            ["192.168.0.1/24", "192.168.0.1/26"],
            ["192.168.0.1/26", "192.168.0.1/24"],
        ] {
            let errors = cidr_overlap(&values, "match_values").unwrap_err();
            assert_eq!(errors.len(), 1, "{values:?}");
            assert_eq!(
                errors[0].message,
                "\"match_values\" CIDR \"192.168.0.1/26\" overlaps with CIDR \"192.168.0.1/24\""
            );
        }
    }

    #[test]
    fn test_same_network_different_host_bits() {
        assert!(cidr_overlap(&["10.0.0.1/24", "10.0.0.2/24"], "match_values").is_err());
    }

    #[test]
    fn test_families_compared_separately() {
        let values = ["0.0.0.0/0", "::/0", "10.0.0.0/8"];
        let errors = cidr_overlap(&values, "match_values").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(cidr_overlap(&["0.0.0.0/0", "::/0"], "match_values").is_ok());
    }

    #[test]
    fn test_ipv6_overlap() {
        assert!(cidr_overlap(&["2001:db8::/32", "2001:db8:1::/48"], "match_values").is_err());
        assert!(cidr_overlap(&["2001:db8::/32", "2001:db9::/32"], "match_values").is_ok());
    }

    #[test]
    fn test_invalid_entry() {
        let errors = cidr_overlap(&["10.0.0.0/8", "10.0.0.0"], "match_values").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("valid CIDRs"));
    }

    #[test]
    fn test_empty_list() {
        let values: [&str; 0] = [];
        assert!(cidr_overlap(&values, "match_values").is_ok());
    }
}
