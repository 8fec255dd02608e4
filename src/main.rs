//! Tagpack - asset bundler CLI.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use tagpack::cli::{self, Cli, Commands};
use tagpack::config::TagpackConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = TagpackConfig::load(&cli.config)?;

    match &cli.command {
        Commands::Build { args } => cli::build::build_bundles(&config, args),
        Commands::Tags { args } => cli::tags::print_tags(&config, args),
    }
}
