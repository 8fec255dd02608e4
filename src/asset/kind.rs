//! Registered asset definitions.

/// Where an asset's content comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetSource {
    /// A file (or glob, or directory) under the application root.
    Local,
    /// Served from an external URL as-is; the local path is only used in debug mode.
    Remote { url: String },
    /// Content from the embedded resource table, written to the local path in debug mode.
    Embedded { resource: String },
}

/// One registered input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    local_path: String,
    source: AssetSource,
}

impl Asset {
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            local_path: path.into(),
            source: AssetSource::Local,
        }
    }

    pub fn remote(local_path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            source: AssetSource::Remote { url: url.into() },
        }
    }

    pub fn embedded(local_path: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            source: AssetSource::Embedded {
                resource: resource.into(),
            },
        }
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    #[inline]
    pub fn is_embedded(&self) -> bool {
        matches!(self.source, AssetSource::Embedded { .. })
    }

    #[inline]
    pub fn is_remote(&self) -> bool {
        matches!(self.source, AssetSource::Remote { .. })
    }

    /// Remote URL, if this asset is served externally.
    pub fn remote_url(&self) -> Option<&str> {
        match &self.source {
            AssetSource::Remote { url } => Some(url),
            _ => None,
        }
    }

    /// Whether release mode concatenates this asset into the group artifact.
    #[inline]
    pub fn is_bundled(&self) -> bool {
        !self.is_remote()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kinds() {
        let local = Asset::local("~/js/a.js");
        assert!(local.is_bundled());
        assert_eq!(local.remote_url(), None);

        let remote = Asset::remote("~/js/jquery.js", "https://cdn.example.com/jquery.js");
        assert!(remote.is_remote());
        assert!(!remote.is_bundled());
        assert_eq!(remote.remote_url(), Some("https://cdn.example.com/jquery.js"));
        assert_eq!(remote.local_path(), "~/js/jquery.js");

        let embedded = Asset::embedded("~/js/widget.js", "widget");
        assert!(embedded.is_embedded());
        assert!(embedded.is_bundled());
        assert_eq!(
            embedded.source(),
            &AssetSource::Embedded {
                resource: "widget".into()
            }
        );
    }
}
