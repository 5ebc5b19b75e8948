//! Error handling and display for the CLI.

use azcdn_id::IdError;
use azcdn_migration::MigrationError;
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Unknown resource kind '{0}'")]
    UnknownKind(String),

    #[error("Unknown validator '{0}'")]
    UnknownValidator(String),

    #[error("Invalid resource ID: {0}")]
    InvalidId(#[from] IdError),

    #[error("Validation failed with {count} error(s)")]
    Validation { count: usize },

    #[error("State upgrade failed: {0}")]
    Migration(#[from] MigrationError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(hint) = err.downcast_ref::<CliError>().and_then(hint) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint(err: &CliError) -> Option<String> {
    match err {
        CliError::UnknownKind(_) => {
            Some("Run `azcdn id kinds` to list the supported kinds.".to_string())
        }
        CliError::UnknownValidator(_) => {
            Some("Run `azcdn validate --list` to list the available validators.".to_string())
        }
        CliError::InvalidId(e) if e.is_missing_segment() => Some(
            "Keywords are case sensitive. Use `azcdn id normalize` to repair an ID with the wrong casing."
                .to_string(),
        ),
        CliError::Migration(MigrationError::InvalidId { .. } | MigrationError::MissingId { .. }) => {
            Some("The state file was not modified.".to_string())
        }
        CliError::Migration(MigrationError::UnsupportedVersion { .. }) => Some(
            "The state was written by a newer provider release; upgrade azcdn.".to_string(),
        ),
        _ => None,
    }
}
