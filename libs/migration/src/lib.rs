//! # azcdn-migration
//!
//! Terraform state upgrades for CDN and Front Door resources.
//!
//! Earlier releases stored some resource IDs with literal keywords in the
//! wrong case (`frontdoors`, `resourcegroups`, ...). Each affected resource
//! type moves from schema version 0 to 1 by re-parsing its stored `id`
//! insensitively and writing it back in canonical form.
//!
//! ## Layers
//!
//! - [`StateUpgrade`]: one version step over a single instance's attributes
//! - [`UpgradeRegistry`]: ordered steps per Terraform resource type
//! - [`StateDocument`]: a whole state file, upgraded all-or-nothing
//!
//! Nothing here mutates its input on failure.

mod error;
mod registry;
mod state;
mod upgrade;

pub use error::MigrationError;
pub use registry::UpgradeRegistry;
pub use state::{
    StateDocument, StateInstance, StateResource, UpgradeReport, UpgradedInstance,
    STATE_FORMAT_VERSION,
};
pub use upgrade::{IdCasingUpgrade, StateUpgrade};

/// Raw attributes of one resource instance, as stored in state.
pub type RawState = serde_json::Map<String, serde_json::Value>;
