//! Terraform state commands.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use azcdn_migration::{StateDocument, UpgradeRegistry, UpgradeReport, UpgradedInstance};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::error::CliError;
use crate::output::{display_option, print_info, print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Terraform state commands.
#[derive(Debug, Args)]
pub struct StateCommand {
    #[command(subcommand)]
    command: StateSubcommand,
}

#[derive(Debug, Subcommand)]
enum StateSubcommand {
    /// Upgrade resource instances to the current schema version.
    ///
    /// Rewrites stored IDs in canonical casing. Either every instance is
    /// upgraded or the file is left untouched.
    Upgrade(UpgradeArgs),
}

#[derive(Debug, Args)]
struct UpgradeArgs {
    /// Terraform state file (JSON, format version 4).
    input: PathBuf,

    /// Write the upgraded state here instead of rewriting the input.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Report what would change without writing anything.
    #[arg(long)]
    dry_run: bool,
}

impl StateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            StateSubcommand::Upgrade(args) => upgrade_state(ctx, args),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct UpgradeRow {
    #[tabled(rename = "Resource")]
    resource: String,

    #[tabled(rename = "Version")]
    version: String,

    #[tabled(rename = "Old ID", display = "display_option")]
    old_id: Option<String>,

    #[tabled(rename = "New ID", display = "display_option")]
    new_id: Option<String>,
}

impl From<&UpgradedInstance> for UpgradeRow {
    fn from(instance: &UpgradedInstance) -> Self {
        let name = instance.name.as_deref().unwrap_or("-");
        Self {
            resource: format!("{}.{}[{}]", instance.resource_type, name, instance.index),
            version: format!("{} -> {}", instance.from_version, instance.to_version),
            old_id: instance.old_id.clone(),
            new_id: instance.new_id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpgradeOutcome<'a> {
    input: &'a Path,
    written: Option<&'a Path>,
    dry_run: bool,
    upgraded: &'a [UpgradedInstance],
}

/// Upgrades the state file at `input`, returning the report and the path
/// written, if any.
///
/// Without `output` the input is rewritten in place, and only if something
/// changed. With `output` the result is always written there.
fn upgrade_file(
    input: &Path,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<(UpgradeReport, Option<PathBuf>)> {
    let contents = fs::read_to_string(input)
        .with_context(|| format!("Failed to read state from {:?}", input))?;

    let mut document = StateDocument::from_json(&contents)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to parse state from {:?}", input))?;

    let report = document
        .apply(&UpgradeRegistry::builtin())
        .map_err(CliError::from)?;

    let target = match output {
        Some(path) => Some(path),
        None if !report.is_empty() => Some(input),
        None => None,
    };

    let written = match target {
        Some(path) if !dry_run => {
            let json = document.to_json().map_err(CliError::from)?;
            write_atomically(path, &(json + "\n"))?;
            info!(path = %path.display(), upgraded = report.len(), "wrote upgraded state");
            Some(path.to_path_buf())
        }
        _ => None,
    };

    Ok((report, written))
}

/// Replaces `path` with `contents` without ever truncating it.
///
/// The contents go to a sibling temp file which is synced and renamed over
/// the target. An existing target keeps its permissions.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");

    let written = (|| -> Result<()> {
        let mut file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create temp file {:?}", tmp_path))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write temp file {:?}", tmp_path))?;
        file.sync_all()
            .with_context(|| format!("Failed to sync temp file {:?}", tmp_path))?;

        if let Ok(metadata) = fs::metadata(path) {
            fs::set_permissions(&tmp_path, metadata.permissions())
                .with_context(|| format!("Failed to copy permissions to {:?}", tmp_path))?;
        }

        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to write state to {:?}", path))
    })();

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

/// Upgrade a Terraform state file.
fn upgrade_state(ctx: CommandContext, args: UpgradeArgs) -> Result<()> {
    let (report, written) = upgrade_file(&args.input, args.output.as_deref(), args.dry_run)?;

    match ctx.format {
        OutputFormat::Table => {
            if report.is_empty() {
                print_info("No instances need upgrading.");
            } else {
                let rows: Vec<UpgradeRow> = report.upgraded.iter().map(UpgradeRow::from).collect();
                print_output(&rows, ctx.format);
            }

            match &written {
                Some(path) => print_success(&format!(
                    "Upgraded {} instance(s), wrote {}",
                    report.len(),
                    path.display()
                )),
                None if args.dry_run => print_info("Dry run, nothing written."),
                None => {}
            }
        }
        OutputFormat::Json => print_single(&UpgradeOutcome {
            input: &args.input,
            written: written.as_deref(),
            dry_run: args.dry_run,
            upgraded: &report.upgraded,
        }),
    }
    Ok(())
}
