use std::fs;
use std::path::Path;

use super::Renderer;
use crate::core::{BundleError, Result};
use crate::debug;

/// Writes content to the destination file, creating parent directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer;

impl Renderer for FileRenderer {
    fn render(&self, content: &str, destination: &Path) -> Result<()> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(BundleError::io(parent))?;
        }
        fs::write(destination, content).map_err(BundleError::io(destination))?;
        debug!("render"; "wrote {} ({} bytes)", destination.display(), content.len());
        Ok(())
    }
}
