//! azcdn - operator CLI for CDN and Front Door resources.
//!
//! Parses and repairs ARM resource IDs, runs field validators and upgrades
//! Terraform state files.

use anyhow::Result;
use clap::Parser;

mod commands;
mod config;
mod error;
mod logging;
mod output;

use commands::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error::print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::Config::from_env()?;
    logging::init(&config);

    cli.run()
}
