//! Resource ID commands.

use anyhow::Result;
use azcdn_id::{Casing, ResourceKind};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

/// Resource ID commands.
#[derive(Debug, Args)]
pub struct IdCommand {
    #[command(subcommand)]
    command: IdSubcommand,
}

#[derive(Debug, Subcommand)]
enum IdSubcommand {
    /// Parse an ID and print its fields.
    Parse(ParseArgs),

    /// Repair the keyword casing of an ID.
    Normalize(NormalizeArgs),

    /// List the supported resource kinds.
    Kinds,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Resource kind, e.g. `profile` or `front-door-rule`.
    kind: String,

    /// Resource ID.
    id: String,

    /// Accept keywords in any casing.
    #[arg(long)]
    insensitive: bool,
}

#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Resource kind, e.g. `front-door` or `backend-pool`.
    kind: String,

    /// Resource ID, keywords in any casing.
    id: String,
}

impl IdCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            IdSubcommand::Parse(args) => parse_id(ctx, args),
            IdSubcommand::Normalize(args) => normalize_id(ctx, args),
            IdSubcommand::Kinds => list_kinds(ctx),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,

    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Debug, Serialize, Tabled)]
struct KindRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,

    #[tabled(rename = "Provider")]
    provider: &'static str,

    #[tabled(rename = "Template")]
    template: String,
}

#[derive(Debug, Serialize)]
struct NormalizedId {
    kind: &'static str,
    id: String,
    changed: bool,
}

fn resolve_kind(name: &str) -> Result<ResourceKind, CliError> {
    ResourceKind::from_name(name).ok_or_else(|| CliError::UnknownKind(name.to_string()))
}

fn decode_fields(kind: &str, id: &str, insensitive: bool) -> Result<Vec<FieldRow>, CliError> {
    let kind = resolve_kind(kind)?;
    let casing = if insensitive {
        Casing::Insensitive
    } else {
        Casing::Sensitive
    };

    let fields = kind.decode(id, casing)?;
    Ok(fields
        .into_iter()
        .map(|(field, value)| FieldRow { field, value })
        .collect())
}

fn normalize(kind: &str, id: &str) -> Result<NormalizedId, CliError> {
    let kind = resolve_kind(kind)?;
    let normalized = kind.normalize(id)?;
    debug!(kind = %kind, input = id, id = %normalized, "normalized ID");

    Ok(NormalizedId {
        kind: kind.name(),
        changed: normalized != id,
        id: normalized,
    })
}

/// Parse an ID and print its fields.
fn parse_id(ctx: CommandContext, args: ParseArgs) -> Result<()> {
    let rows = decode_fields(&args.kind, &args.id, args.insensitive)?;

    match ctx.format {
        OutputFormat::Table => print_output(&rows, ctx.format),
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = rows
                .into_iter()
                .map(|row| (row.field.to_string(), row.value.into()))
                .collect();
            print_single(&object);
        }
    }
    Ok(())
}

/// Print the canonical form of an ID.
fn normalize_id(ctx: CommandContext, args: NormalizeArgs) -> Result<()> {
    let normalized = normalize(&args.kind, &args.id)?;

    match ctx.format {
        OutputFormat::Table => println!("{}", normalized.id),
        OutputFormat::Json => print_single(&normalized),
    }
    Ok(())
}

/// List every resource kind with its ID template.
fn list_kinds(ctx: CommandContext) -> Result<()> {
    let rows: Vec<KindRow> = ResourceKind::ALL
        .iter()
        .map(|kind| {
            let template = kind.template();
            KindRow {
                kind: kind.name(),
                provider: template.provider,
                template: template.pattern(),
            }
        })
        .collect();

    print_output(&rows, ctx.format);
    Ok(())
}
