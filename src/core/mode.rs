//! Render mode selection for development/production output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a bundle is turned into HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// One unminified tag per asset, for source-level debugging.
    Debug,
    /// One minified, content-hashed artifact per group.
    #[default]
    Release,
}

impl RenderMode {
    /// Check if this is debug mode.
    #[inline]
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
