//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::core::RenderMode;

/// Asset bundler: debug tags while developing, hashed minified bundles in production
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: tagpack.toml, searched upward)
    #[arg(short = 'C', long, default_value = "tagpack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render bundles and write their artifacts
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Print the tags each bundle renders to
    #[command(visible_alias = "t")]
    Tags {
        #[command(flatten)]
        args: TagsArgs,
    },
}

/// Arguments shared by every command that renders.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Bundles to render (default: all configured bundles)
    #[arg(value_name = "BUNDLE")]
    pub bundles: Vec<String>,

    /// Render one tag per source file
    #[arg(short, long, conflicts_with = "release")]
    pub debug: bool,

    /// Render minified, hashed bundles
    #[arg(short, long)]
    pub release: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Mode forced on the command line, if any.
    pub const fn mode(&self) -> Option<RenderMode> {
        match (self.debug, self.release) {
            (true, _) => Some(RenderMode::Debug),
            (_, true) => Some(RenderMode::Release),
            _ => None,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TagsArgs {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Print a JSON object mapping bundle name to tags
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long, requires = "json")]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["tagpack", "-C", "app/tagpack.toml", "build", "--debug", "site"]);
        assert_eq!(cli.config, PathBuf::from("app/tagpack.toml"));
        let Commands::Build { args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.render.bundles, vec!["site"]);
        assert_eq!(args.render.mode(), Some(RenderMode::Debug));
    }

    #[test]
    fn test_parse_tags() {
        let cli = Cli::parse_from(["tagpack", "tags", "--json", "--pretty", "-V"]);
        let Commands::Tags { args } = cli.command else {
            panic!("expected tags");
        };
        assert!(args.json && args.pretty && args.render.verbose);
        assert_eq!(args.render.mode(), None);
    }

    #[test]
    fn test_debug_conflicts_with_release() {
        let result = Cli::try_parse_from(["tagpack", "build", "--debug", "--release"]);
        assert!(result.is_err());
    }
}
