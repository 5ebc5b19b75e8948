//! Macro for defining typed resource ID types.

/// Defines a resource ID struct from its provider namespace and segment list.
///
/// This generates a struct with `subscription_id`, `resource_group` and one
/// `String` field per segment, plus:
/// - a `TEMPLATE` constant describing the layout
/// - `new()` from field values
/// - `id()` to format the canonical string
/// - `parse()` and `parse_insensitively()`
/// - `Display`, `FromStr`, `Serialize`, `Deserialize` and [`ResourceId`](crate::ResourceId)
///
/// # Example
///
/// ```ignore
/// define_resource_id! {
///     /// A Front Door rule set.
///     FrontDoorRuleSetId {
///         provider: "Microsoft.Cdn",
///         segments: {
///             "profiles" => profile_name,
///             "ruleSets" => rule_set_name,
///         },
///     }
/// }
///
/// let id = FrontDoorRuleSetId::new("sub", "rg", "profile1", "ruleSet1");
/// let parsed: FrontDoorRuleSetId = id.id().parse()?;
/// ```
#[macro_export]
macro_rules! define_resource_id {
    (
        $(#[$meta:meta])*
        $name:ident {
            provider: $provider:literal,
            segments: { $( $key:literal => $field:ident ),+ $(,)? } $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            pub subscription_id: String,
            pub resource_group: String,
            $( pub $field: String, )+
        }

        impl $name {
            /// Layout of this ID type.
            pub const TEMPLATE: $crate::IdTemplate = $crate::IdTemplate {
                provider: $provider,
                segments: &[
                    $( $crate::Segment { key: $key, field: stringify!($field) }, )+
                ],
            };

            /// Creates an ID from its segment values.
            #[must_use]
            pub fn new(
                subscription_id: impl Into<String>,
                resource_group: impl Into<String>,
                $( $field: impl Into<String>, )+
            ) -> Self {
                Self {
                    subscription_id: subscription_id.into(),
                    resource_group: resource_group.into(),
                    $( $field: $field.into(), )+
                }
            }

            /// Formats the canonical ID string.
            #[must_use]
            pub fn id(&self) -> String {
                Self::TEMPLATE.format(
                    &self.subscription_id,
                    &self.resource_group,
                    &[$( self.$field.as_str() ),+],
                )
            }

            /// Parses an ID whose keywords use the canonical casing.
            pub fn parse(input: &str) -> Result<Self, $crate::IdError> {
                Self::decode(input, $crate::Casing::Sensitive)
            }

            /// Parses an ID ignoring the casing of its keywords.
            ///
            /// Only for repairing IDs persisted with the wrong casing; use
            /// [`Self::parse`] for anything user supplied.
            pub fn parse_insensitively(input: &str) -> Result<Self, $crate::IdError> {
                Self::decode(input, $crate::Casing::Insensitive)
            }

            fn decode(input: &str, casing: $crate::Casing) -> Result<Self, $crate::IdError> {
                let decoded = Self::TEMPLATE.decode(input, casing)?;
                let mut values = decoded.values.into_iter();
                Ok(Self {
                    subscription_id: decoded.subscription_id,
                    resource_group: decoded.resource_group,
                    $( $field: values.next().unwrap_or_default(), )+
                })
            }
        }

        impl $crate::ResourceId for $name {
            fn id(&self) -> String {
                $name::id(self)
            }

            fn parse(input: &str) -> Result<Self, $crate::IdError> {
                $name::parse(input)
            }

            fn parse_insensitively(input: &str) -> Result<Self, $crate::IdError> {
                $name::parse_insensitively(input)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.id())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl $crate::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                serializer.serialize_str(&self.id())
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                let s = <String as $crate::serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&s).map_err(<D::Error as $crate::serde::de::Error>::custom)
            }
        }
    };
}
