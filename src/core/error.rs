//! Render error types.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T, E = BundleError> = std::result::Result<T, E>;

/// Errors surfaced by render operations.
///
/// A reference that resolves to zero files is not an error; it simply
/// contributes nothing to the output.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("no bundle named `{0}` has been persisted")]
    RegistryMiss(String),

    #[error("bundle `{0}` is registered but its rendered content is no longer cached")]
    NotCached(String),

    #[error("no render path recorded for `{0}`; render it once with a destination first")]
    MissingRenderPath(String),

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("{minifier} failed to minify: {message}")]
    Minify {
        minifier: &'static str,
        message: String,
    },

    #[error("invalid remote url `{0}`")]
    InvalidRemote(String, #[source] url::ParseError),

    #[error("invalid glob pattern `{0}`: {1}")]
    Pattern(String, String),

    #[error("timed out waiting for render lock on `{0}`")]
    LockTimeout(String),
}

impl BundleError {
    /// Adapter for `map_err` on IO results tied to a path.
    pub fn io(path: &Path) -> impl FnOnce(io::Error) -> Self {
        let path = path.to_path_buf();
        move |err| Self::Io(path, err)
    }
}
