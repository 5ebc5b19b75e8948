//! Generic segment-list codec shared by every resource ID type.
//!
//! An ARM resource ID is a sequence of `/key/value` pairs:
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{rg}/providers/{namespace}/{key}/{value}/...
//! ```
//!
//! Each resource type only differs in its provider namespace and the ordered
//! list of keyword/value pairs that follow it, so the whole codec is driven
//! by an [`IdTemplate`].

use crate::IdError;

const SUBSCRIPTIONS: &str = "subscriptions";
const RESOURCE_GROUPS: &str = "resourceGroups";
const PROVIDERS: &str = "providers";

/// How literal keywords are compared while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Casing {
    /// Keywords must appear in their canonical casing.
    Sensitive,
    /// Keywords may appear in any casing. Only for repairing IDs that older
    /// releases persisted with the wrong casing.
    Insensitive,
}

impl Casing {
    /// Compares a canonical keyword against the keyword found in the input.
    pub fn matches(self, canonical: &str, found: &str) -> bool {
        match self {
            Casing::Sensitive => canonical == found,
            Casing::Insensitive => canonical.eq_ignore_ascii_case(found),
        }
    }
}

/// One named segment below the provider namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Literal keyword in canonical casing, e.g. `originGroups`.
    pub key: &'static str,
    /// Name of the struct field holding the value, e.g. `origin_group_name`.
    pub field: &'static str,
}

/// Fixed layout of one resource ID type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdTemplate {
    /// Provider namespace, e.g. `Microsoft.Cdn`.
    pub provider: &'static str,
    /// Segments after the provider namespace, outermost first.
    pub segments: &'static [Segment],
}

/// Values pulled out of an ID by [`IdTemplate::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedId {
    pub subscription_id: String,
    pub resource_group: String,
    /// One value per template segment, in template order.
    pub values: Vec<String>,
}

impl IdTemplate {
    /// Formats the canonical ID string.
    ///
    /// `values` must hold one entry per segment.
    pub fn format(&self, subscription_id: &str, resource_group: &str, values: &[&str]) -> String {
        debug_assert_eq!(values.len(), self.segments.len());

        let mut id = format!(
            "/{SUBSCRIPTIONS}/{subscription_id}/{RESOURCE_GROUPS}/{resource_group}/{PROVIDERS}/{}",
            self.provider
        );
        for (segment, value) in self.segments.iter().zip(values) {
            id.push('/');
            id.push_str(segment.key);
            id.push('/');
            id.push_str(value);
        }
        id
    }

    /// Renders the template with `{field}` placeholders, for display.
    pub fn pattern(&self) -> String {
        let mut pattern = format!(
            "/{SUBSCRIPTIONS}/{{subscription_id}}/{RESOURCE_GROUPS}/{{resource_group}}/{PROVIDERS}/{}",
            self.provider
        );
        for segment in self.segments {
            pattern.push_str(&format!("/{}/{{{}}}", segment.key, segment.field));
        }
        pattern
    }

    /// Decodes `input`, requiring every segment in order and nothing after.
    pub fn decode(&self, input: &str, casing: Casing) -> Result<DecodedId, IdError> {
        if input.is_empty() {
            return Err(IdError::Empty);
        }

        let Some(path) = input.strip_prefix('/') else {
            return Err(IdError::InvalidFormat {
                message: format!("expected an ID beginning with '/', got {input:?}"),
            });
        };

        let mut cursor = SegmentCursor::new(path, casing);

        let subscription_id = cursor.take(SUBSCRIPTIONS)?;
        let resource_group = cursor.take(RESOURCE_GROUPS)?;

        let provider = cursor.take(PROVIDERS)?;
        if !casing.matches(self.provider, provider) {
            return Err(IdError::ProviderMismatch {
                expected: self.provider,
                actual: provider.to_string(),
            });
        }

        let values = self
            .segments
            .iter()
            .map(|segment| cursor.take(segment.key).map(str::to_string))
            .collect::<Result<Vec<_>, _>>()?;

        cursor.finish()?;

        Ok(DecodedId {
            subscription_id: subscription_id.to_string(),
            resource_group: resource_group.to_string(),
            values,
        })
    }
}

/// Walks `/`-separated components two at a time.
struct SegmentCursor<'a> {
    components: std::str::Split<'a, char>,
    casing: Casing,
    /// Keyword of the most recently taken pair.
    last_key: &'static str,
}

impl<'a> SegmentCursor<'a> {
    fn new(path: &'a str, casing: Casing) -> Self {
        Self {
            components: path.split('/'),
            casing,
            last_key: SUBSCRIPTIONS,
        }
    }

    /// Consumes `key` and returns the value that follows it.
    fn take(&mut self, key: &'static str) -> Result<&'a str, IdError> {
        self.last_key = key;
        match self.components.next() {
            Some(found) if self.casing.matches(key, found) => {}
            _ => return Err(IdError::MissingSegment { key }),
        }

        match self.components.next() {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(IdError::EmptySegment { key }),
        }
    }

    fn finish(self) -> Result<(), IdError> {
        let remaining: Vec<&str> = self.components.collect();
        match remaining.as_slice() {
            [] => Ok(()),
            // A trailing '/' opens a pair with nothing in it.
            [""] => Err(IdError::EmptySegment { key: self.last_key }),
            _ => Err(IdError::UnexpectedSegments {
                remaining: remaining.join("/"),
            }),
        }
    }
}
