//! Persistence of rendered bundle content.
//!
//! - [`FileRenderer`] writes the artifact to its output file.
//! - [`CacheRenderer`] keeps it in memory under the bundle name, for apps
//!   that serve bundles from a handler instead of from disk.

mod cache;
mod file;

use std::path::Path;

pub use cache::{CacheRenderer, RawContentStore};
pub use file::FileRenderer;

use crate::core::Result;

pub trait Renderer: Send + Sync {
    fn render(&self, content: &str, destination: &Path) -> Result<()>;
}
