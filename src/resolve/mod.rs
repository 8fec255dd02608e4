//! Resolution of asset references into concrete, readable locations.
//!
//! Every asset becomes an [`InputFile`]: a reference plus the resolver kind
//! that understands it. Selection order: embedded resource, then remote URL,
//! then the local file system.

mod embedded;
mod file;
mod remote;

use std::path::PathBuf;
use std::sync::Arc;

pub use embedded::EmbeddedResolver;
pub use file::FileResolver;
pub use remote::RemoteResolver;

use crate::asset::{Asset, AssetSource};
use crate::core::Result;
use crate::utils::path::PathMapper;

/// Turns one reference into zero or more locations.
///
/// An empty result is valid: the reference contributes nothing.
pub trait Resolver: Send + Sync {
    fn try_resolve(&self, reference: &str) -> Result<Vec<PathBuf>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    File,
    Remote,
    Embedded,
}

/// A reference paired with the resolver that understands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: String,
    pub kind: ResolverKind,
}

impl InputFile {
    pub fn for_asset(asset: &Asset, mapper: &PathMapper) -> Self {
        match asset.source() {
            AssetSource::Embedded { resource } => Self {
                path: resource.clone(),
                kind: ResolverKind::Embedded,
            },
            AssetSource::Remote { url } => Self {
                path: url.clone(),
                kind: ResolverKind::Remote,
            },
            AssetSource::Local => Self {
                path: mapper
                    .to_file_system(asset.local_path())
                    .to_string_lossy()
                    .into_owned(),
                kind: ResolverKind::File,
            },
        }
    }
}

/// One resolver per kind.
#[derive(Clone)]
pub struct Resolvers {
    file: Arc<dyn Resolver>,
    remote: Arc<dyn Resolver>,
    embedded: Arc<dyn Resolver>,
}

impl Resolvers {
    pub fn new(
        file: Arc<dyn Resolver>,
        remote: Arc<dyn Resolver>,
        embedded: Arc<dyn Resolver>,
    ) -> Self {
        Self {
            file,
            remote,
            embedded,
        }
    }

    pub fn get(&self, kind: ResolverKind) -> &dyn Resolver {
        match kind {
            ResolverKind::File => self.file.as_ref(),
            ResolverKind::Remote => self.remote.as_ref(),
            ResolverKind::Embedded => self.embedded.as_ref(),
        }
    }

    pub fn resolve(&self, input: &InputFile) -> Result<Vec<PathBuf>> {
        self.get(input.kind).try_resolve(&input.path)
    }

    pub fn set_file(&mut self, resolver: Arc<dyn Resolver>) {
        self.file = resolver;
    }

    pub fn set_remote(&mut self, resolver: Arc<dyn Resolver>) {
        self.remote = resolver;
    }

    pub fn set_embedded(&mut self, resolver: Arc<dyn Resolver>) {
        self.embedded = resolver;
    }
}
