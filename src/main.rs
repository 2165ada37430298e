//! Herald - SEO metadata for multi-site content.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use herald::cli::{self, Cli, Commands, common::Project};
use herald::{core, logger};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Init { name, dry } => {
            let dir = name.clone().unwrap_or_else(|| PathBuf::from("."));
            cli::init::new_config(&dir, &cli.config, *dry)
        }
        Commands::Check => cli::check::check_config(&cli.config),
        Commands::Head { target } => cli::render::head(&Project::load(&cli.config)?, target),
        Commands::Schema { target } => cli::render::schema(&Project::load(&cli.config)?, target),
        Commands::Context { target } => cli::render::context(&Project::load(&cli.config)?, target),
        Commands::Text { kind, target } => {
            cli::render::text(&Project::load(&cli.config)?, *kind, target)
        }
        Commands::Serve { interface, port } => {
            cli::serve::serve(Project::load(&cli.config)?, *interface, *port)
        }
    }
}
