//! UCCA CLI: the `ucca` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let settings = support::settings_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Validate { authority, json } => commands::validate::run(
            settings.authority_path(authority),
            settings.json(json),
        ),

        Commands::Enumerate {
            authority,
            rows,
            limit,
            json,
        } => commands::enumerate::run(commands::enumerate::Args {
            authority: settings.authority_path(authority),
            rows: settings.rows(rows),
            limit: settings.limit(limit),
            json: settings.json(json),
        }),

        Commands::Summary { authority, json } => commands::summary::run(
            settings.authority_path(authority),
            settings.json(json),
        ),
    }
}
