//! Terraform JSON state documents.
//!
//! Only the fields needed to locate and upgrade instances are modelled;
//! everything else is carried through `extra` so a document survives a
//! read-upgrade-write cycle without losing data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::{MigrationError, RawState, UpgradeRegistry};

/// State file format version this crate understands.
pub const STATE_FORMAT_VERSION: u64 = 4;

/// A Terraform state file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    pub version: u64,

    #[serde(default)]
    pub resources: Vec<StateResource>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One `resources[]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateResource {
    #[serde(rename = "type")]
    pub resource_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `managed` or `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default)]
    pub instances: Vec<StateInstance>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StateResource {
    fn is_data_source(&self) -> bool {
        self.mode.as_deref() == Some("data")
    }
}

/// One `resources[].instances[]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInstance {
    #[serde(default)]
    pub schema_version: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RawState>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An instance rewritten by [`StateDocument::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradedInstance {
    pub resource_type: String,
    pub name: Option<String>,
    pub index: usize,
    pub from_version: u64,
    pub to_version: u64,
    pub old_id: Option<String>,
    pub new_id: Option<String>,
}

impl UpgradedInstance {
    /// Returns true if the upgrade rewrote the stored ID.
    pub fn id_changed(&self) -> bool {
        self.old_id != self.new_id
    }
}

/// Outcome of [`StateDocument::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpgradeReport {
    pub upgraded: Vec<UpgradedInstance>,
}

impl UpgradeReport {
    pub fn is_empty(&self) -> bool {
        self.upgraded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.upgraded.len()
    }
}

impl StateDocument {
    /// Parses a state document from JSON text.
    pub fn from_json(input: &str) -> Result<Self, MigrationError> {
        let document: Self = serde_json::from_str(input)?;
        if document.version != STATE_FORMAT_VERSION {
            return Err(MigrationError::InvalidState(format!(
                "unsupported state format version {}, expected {STATE_FORMAT_VERSION}",
                document.version
            )));
        }
        Ok(document)
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, MigrationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Upgrades every managed instance whose resource type has registered
    /// upgrades and whose schema version is behind.
    ///
    /// Either every pending instance is upgraded or, on the first error, the
    /// document is left exactly as it was.
    pub fn apply(&mut self, registry: &UpgradeRegistry) -> Result<UpgradeReport, MigrationError> {
        let mut pending = Vec::new();
        let mut report = UpgradeReport::default();

        for (r, resource) in self.resources.iter().enumerate() {
            if resource.is_data_source() {
                continue;
            }
            let Some(current) = registry.schema_version(&resource.resource_type) else {
                continue;
            };

            for (i, instance) in resource.instances.iter().enumerate() {
                if instance.schema_version >= current {
                    if instance.schema_version > current {
                        return Err(MigrationError::UnsupportedVersion {
                            resource_type: resource.resource_type.clone(),
                            version: instance.schema_version,
                            current,
                        });
                    }
                    continue;
                }

                let attributes = instance.attributes.as_ref().ok_or_else(|| {
                    MigrationError::InvalidState(format!(
                        "{}[{i}] has no attributes",
                        resource.resource_type
                    ))
                })?;

                let upgraded = registry.upgrade_instance(
                    &resource.resource_type,
                    instance.schema_version,
                    attributes,
                )?;

                report.upgraded.push(UpgradedInstance {
                    resource_type: resource.resource_type.clone(),
                    name: resource.name.clone(),
                    index: i,
                    from_version: instance.schema_version,
                    to_version: current,
                    old_id: string_attribute(attributes, "id"),
                    new_id: string_attribute(&upgraded, "id"),
                });
                pending.push((r, i, current, upgraded));
            }
        }

        for (r, i, version, attributes) in pending {
            let instance = &mut self.resources[r].instances[i];
            instance.schema_version = version;
            instance.attributes = Some(attributes);
        }

        info!(upgraded = report.len(), "applied state upgrades");
        Ok(report)
    }
}

fn string_attribute(state: &RawState, key: &str) -> Option<String> {
    state.get(key).and_then(Value::as_str).map(str::to_string)
}
