mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize structured logging
    cli_support::logging::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Color(args) => commands::color::run(args),
        Commands::Locale(args) => commands::locale::run(args),
        Commands::Translate(args) => commands::translate::run(args),
    }
}
