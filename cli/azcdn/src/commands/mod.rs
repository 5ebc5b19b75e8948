//! CLI commands.

mod id;
mod state;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// azcdn - inspect CDN and Front Door resource IDs, validate fields and
/// upgrade Terraform state.
#[derive(Debug, Parser)]
#[command(name = "azcdn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        env = "AZCDN_FORMAT"
    )]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse, normalize and list resource IDs.
    Id(id::IdCommand),

    /// Run a field validator over one or more values.
    Validate(validate::ValidateCommand),

    /// Upgrade Terraform state files.
    State(state::StateCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let ctx = CommandContext {
            format: self.format,
        };

        match self.command {
            Commands::Id(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::State(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("azcdn {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flag_is_global() {
        let cli = Cli::try_parse_from(["azcdn", "id", "kinds", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
