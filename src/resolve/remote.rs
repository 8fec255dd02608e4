//! Remote URL references.
//!
//! Remote assets are never fetched: resolving only validates the URL and
//! hands it back verbatim for the tag.

use std::path::PathBuf;

use url::Url;

use super::Resolver;
use crate::core::{BundleError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct RemoteResolver;

impl Resolver for RemoteResolver {
    fn try_resolve(&self, reference: &str) -> Result<Vec<PathBuf>> {
        // Protocol-relative URLs inherit the page scheme; any scheme validates them.
        let candidate = match reference.strip_prefix("//") {
            Some(rest) => format!("https://{rest}"),
            None => reference.to_string(),
        };
        Url::parse(&candidate).map_err(|e| BundleError::InvalidRemote(reference.to_string(), e))?;
        Ok(vec![PathBuf::from(reference)])
    }
}
