//! Command-line interface module.

mod args;
pub mod build;
pub mod tags;

pub use args::{BuildArgs, Cli, Commands, RenderArgs, TagsArgs};
