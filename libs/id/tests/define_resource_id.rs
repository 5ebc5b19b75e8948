//! Resource ID types defined outside this crate.

use azcdn_id::{define_resource_id, IdError, ResourceId};

define_resource_id! {
    /// A Front Door rule set.
    RuleSetId {
        provider: "Microsoft.Cdn",
        segments: {
            "profiles" => profile_name,
            "ruleSets" => rule_set_name,
        },
    }
}

const RULE_SET: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/resGroup1/providers/Microsoft.Cdn/profiles/profile1/ruleSets/ruleSet1";

#[test]
fn serializes_as_canonical_string() {
    let id = RuleSetId::new(
        "12345678-1234-9876-4563-123456789012",
        "resGroup1",
        "profile1",
        "ruleSet1",
    );
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{RULE_SET}\""));

    let parsed: RuleSetId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn deserialize_rejects_bad_casing() {
    let json = format!("\"{}\"", RULE_SET.replace("ruleSets", "rulesets"));
    let err = serde_json::from_str::<RuleSetId>(&json).unwrap_err();
    assert!(err.to_string().contains("ruleSets"), "{err}");
}

#[test]
fn trait_surface() {
    fn normalize<T: ResourceId>(input: &str) -> Result<String, IdError> {
        T::normalize(input)
    }

    let legacy = RULE_SET.replace("ruleSets", "RuleSets");
    assert_eq!(normalize::<RuleSetId>(&legacy).unwrap(), RULE_SET);
    assert_eq!(normalize::<RuleSetId>(""), Err(IdError::Empty));
}
