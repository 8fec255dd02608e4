//! Group bundles: named partitions of assets sharing one attribute set.

use std::collections::BTreeMap;

use super::{Asset, AssetSource};
use crate::freshness::ContentHash;

/// Name of the group every bundle starts with.
pub const DEFAULT_GROUP: &str = "default";

/// HTML attributes rendered into every tag of a group, in key order.
pub type Attributes = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupBundle {
    assets: Vec<Asset>,
    attributes: Attributes,
}

impl GroupBundle {
    pub fn with_attributes(attributes: Attributes) -> Self {
        Self {
            assets: Vec::new(),
            attributes,
        }
    }

    /// Assets in registration (= emission) order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn push(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Replace the attribute set, or overwrite only the given keys when `merge`.
    pub fn set_attributes(&mut self, attributes: Attributes, merge: bool) {
        if merge {
            self.attributes.extend(attributes);
        } else {
            self.attributes = attributes;
        }
    }

    /// Attributes as they appear in a tag: `name="value" ` per entry.
    pub fn attribute_string(&self) -> String {
        self.attributes
            .iter()
            .map(|(name, value)| format!("{name}=\"{value}\" "))
            .collect()
    }

    /// Whether release mode produces an artifact for this group.
    pub fn has_bundled_assets(&self) -> bool {
        self.assets.iter().any(Asset::is_bundled)
    }
}

/// Insertion-ordered group name → `GroupBundle` map.
///
/// Always contains [`DEFAULT_GROUP`] as its first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMap {
    groups: Vec<(String, GroupBundle)>,
}

impl Default for GroupMap {
    fn default() -> Self {
        Self {
            groups: vec![(DEFAULT_GROUP.to_string(), GroupBundle::default())],
        }
    }
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a group, creating it empty on first reference.
    pub fn get_or_insert(&mut self, name: &str) -> &mut GroupBundle {
        let idx = match self.groups.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.groups
                    .push((name.to_string(), GroupBundle::default()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[idx].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupBundle)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    /// True when no group holds an asset, even though groups may exist.
    pub fn has_no_assets(&self) -> bool {
        self.groups.iter().all(|(_, g)| g.assets.is_empty())
    }

    /// Structural hash over group names, assets and attributes.
    ///
    /// Two maps with the same registrations (in the same order) share a
    /// fingerprint regardless of which bundle instance built them.
    pub fn fingerprint(&self) -> ContentHash {
        let mut hasher = blake3::Hasher::new();
        let mut feed = |s: &str| {
            hasher.update(&(s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        };

        for (name, group) in &self.groups {
            feed("group");
            feed(name);
            for asset in &group.assets {
                feed(asset.local_path());
                match asset.source() {
                    AssetSource::Local => feed("local"),
                    AssetSource::Remote { url } => {
                        feed("remote");
                        feed(url);
                    }
                    AssetSource::Embedded { resource } => {
                        feed("embedded");
                        feed(resource);
                    }
                }
            }
            for (key, value) in &group.attributes {
                feed("attr");
                feed(key);
                feed(value);
            }
        }

        ContentHash::new(*hasher.finalize().as_bytes())
    }
}
