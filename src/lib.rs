//! Tagpack - asset bundling for web applications.
//!
//! Register script or style sources on a [`Bundle`], then render it:
//! - debug mode emits one tag per source file, served unmodified;
//! - release mode concatenates, minifies and writes one artifact per group,
//!   and emits a tag whose URL carries the content hash.
//!
//! Rendered output is cached in a [`BundleContext`] until a source file
//! changes, and bundles can be persisted by name for later lookup.

pub mod logger;

pub mod asset;
pub mod bundle;
pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod freshness;
pub mod render;
pub mod resolve;
pub mod utils;

pub use bundle::Bundle;
pub use crate::core::{BundleContext, BundleError, RenderMode, Result};
