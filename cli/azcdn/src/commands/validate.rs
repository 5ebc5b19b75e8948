//! Field validator commands.

use anyhow::Result;
use azcdn_validate::{cidr_overlap, field_validator, ValidationError, FIELD_VALIDATORS};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Validates the whole list of values at once rather than one by one.
const CIDR_OVERLAP: &str = "cidr-overlap";

/// Run a field validator over one or more values.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Validator name, e.g. `front-door-rule-name` or `cache-duration`.
    #[arg(required_unless_present = "list")]
    validator: Option<String>,

    /// Values to validate.
    #[arg(required_unless_present = "list")]
    values: Vec<String>,

    /// Attribute key named in error messages.
    #[arg(long, default_value = "value")]
    key: String,

    /// List the available validators.
    #[arg(long, conflicts_with = "validator")]
    list: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ErrorRow {
    #[tabled(rename = "Key")]
    key: String,

    #[tabled(rename = "Message")]
    message: String,
}

impl From<ValidationError> for ErrorRow {
    fn from(err: ValidationError) -> Self {
        Self {
            key: err.key,
            message: err.message,
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidationOutcome<'a> {
    validator: &'a str,
    valid: bool,
    errors: &'a [ErrorRow],
}

#[derive(Debug, Serialize, Tabled)]
struct ValidatorRow {
    #[tabled(rename = "Validator")]
    name: &'static str,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        if self.list {
            return list_validators(ctx);
        }

        let name = self.validator.unwrap_or_default();
        let errors: Vec<ErrorRow> = run_validator(&name, &self.values, &self.key)?
            .into_iter()
            .map(ErrorRow::from)
            .collect();

        match ctx.format {
            OutputFormat::Table if errors.is_empty() => print_success(&format!(
                "{} value(s) passed '{name}'",
                self.values.len()
            )),
            OutputFormat::Table => print_output(&errors, ctx.format),
            OutputFormat::Json => print_single(&ValidationOutcome {
                validator: &name,
                valid: errors.is_empty(),
                errors: &errors,
            }),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation {
                count: errors.len(),
            }
            .into())
        }
    }
}

fn validator_names() -> impl Iterator<Item = &'static str> {
    FIELD_VALIDATORS
        .iter()
        .map(|(name, _)| *name)
        .chain(std::iter::once(CIDR_OVERLAP))
}

/// Runs the named validator, returning every error found.
fn run_validator(
    name: &str,
    values: &[String],
    key: &str,
) -> Result<Vec<ValidationError>, CliError> {
    if name == CIDR_OVERLAP {
        return Ok(cidr_overlap(values, key).err().unwrap_or_default());
    }

    let validator =
        field_validator(name).ok_or_else(|| CliError::UnknownValidator(name.to_string()))?;

    Ok(values
        .iter()
        .filter_map(|value| validator(value, key).err())
        .flatten()
        .collect())
}

fn list_validators(ctx: CommandContext) -> Result<()> {
    let rows: Vec<ValidatorRow> = validator_names()
        .map(|name| ValidatorRow { name })
        .collect();
    print_output(&rows, ctx.format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn runs_named_validator_over_every_value() {
        let errors = run_validator(
            "cache-duration",
            &values(&["1.00:00:00", "00:00:00", "0.01:00:00"]),
            "cache_duration",
        )
        .unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.key == "cache_duration"));
    }

    #[test]
    fn cidr_overlap_sees_the_whole_list() {
        let overlapping = values(&["192.168.0.1/24", "192.168.0.1/26"]);
        assert_eq!(run_validator(CIDR_OVERLAP, &overlapping, "match_values").unwrap().len(), 1);

        let disjoint = values(&["192.168.0.1/24", "192.168.1.1/24"]);
        assert!(run_validator(CIDR_OVERLAP, &disjoint, "match_values").unwrap().is_empty());
    }

    #[test]
    fn unknown_validator() {
        let err = run_validator("nope", &values(&["x"]), "value").unwrap_err();
        assert!(matches!(err, CliError::UnknownValidator(name) if name == "nope"));
    }

    #[test]
    fn lists_every_validator() {
        let names: Vec<_> = validator_names().collect();
        assert_eq!(names.len(), FIELD_VALIDATORS.len() + 1);
        assert!(names.contains(&"cidr-overlap"));
        assert!(names.contains(&"front-door-name"));
    }
}
