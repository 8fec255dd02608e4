//! Utility modules shared by the bundler.

pub mod path;
