//! Release rendering: one minified, content-hashed artifact per group.

use std::path::PathBuf;

use super::render::{RenderPass, concatenate, read_source};
use crate::asset::{DEFAULT_GROUP, GroupBundle};
use crate::core::{BundleError, Result};
use crate::debug;
use crate::render::Renderer;
use crate::resolve::ResolverKind;
use crate::utils::path::{append_query_param, insert_before_extension};

/// Appended after every file in a release artifact.
const FILE_SEPARATOR: &str = "\n";

/// Placeholder in a destination that is replaced by the content hash.
const HASH_PLACEHOLDER: char = '#';

impl RenderPass<'_> {
    pub(super) fn release(
        &mut self,
        destination: Option<&str>,
        key: &str,
        renderer: &dyn Renderer,
    ) -> Result<String> {
        let bundle = self.bundle;
        let mut out = String::new();

        for (name, group) in bundle.groups.iter() {
            let attributes = group.attribute_string();
            out.push_str(&self.remote_tags(group, &attributes)?);

            if !group.has_bundled_assets() {
                continue;
            }

            let destination = self.group_destination(name, key, destination)?;
            let target = if name == DEFAULT_GROUP {
                destination
            } else {
                insert_before_extension(&destination, name)
            };
            out.push_str(&self.render_group(group, &attributes, &target, renderer)?);
        }
        Ok(out)
    }

    /// Tags for remote assets, pointing at their URLs verbatim.
    fn remote_tags(&self, group: &GroupBundle, attributes: &str) -> Result<String> {
        let bundle = self.bundle;
        let resolver = bundle.ctx.resolvers().get(ResolverKind::Remote);

        let mut tags = String::new();
        for url in group.assets().iter().filter_map(|a| a.remote_url()) {
            for location in resolver.try_resolve(url)? {
                tags.push_str(&bundle.policy.template.render(attributes, &location.to_string_lossy()));
            }
        }
        Ok(tags)
    }

    /// Record `destination` for this group, or recall the recorded one.
    fn group_destination(&self, group: &str, key: &str, destination: Option<&str>) -> Result<String> {
        let ctx = &self.bundle.ctx;
        let path_key = self.bundle.render_path_key(group, key);
        match destination {
            Some(destination) => {
                ctx.remember_render_path(&path_key, destination);
                Ok(destination.to_string())
            }
            None => ctx
                .render_path(&path_key)
                .ok_or(BundleError::MissingRenderPath(path_key)),
        }
    }

    fn render_group(
        &mut self,
        group: &GroupBundle,
        attributes: &str,
        target: &str,
        renderer: &dyn Renderer,
    ) -> Result<String> {
        let bundle = self.bundle;
        let mapper = bundle.ctx.mapper();
        let hasher = bundle.ctx.hasher();
        let minifier = bundle.minifier();

        let mut files = Vec::new();
        for asset in group.assets().iter().filter(|a| a.is_bundled()) {
            files.extend(self.resolve(asset)?);
        }

        let mut output_file = mapper.to_file_system(target);
        let mut tag_path = mapper.expand(target);

        let hash_in_file_name = target.contains(HASH_PLACEHOLDER);
        let mut minified = None;
        if hash_in_file_name {
            let content = minifier.minify(&concatenate(&files, FILE_SEPARATOR)?)?;
            let digest = hasher.hash(&content);
            tag_path = tag_path.replace(HASH_PLACEHOLDER, &digest);
            output_file = PathBuf::from(
                output_file
                    .to_string_lossy()
                    .replace(HASH_PLACEHOLDER, &digest),
            );
            minified = Some(content);
        }

        let content = if bundle.only_if_missing && !hash_in_file_name && output_file.is_file() {
            debug!("render"; "reusing existing {}", output_file.display());
            read_source(&output_file)?
        } else {
            let content = match minified {
                Some(content) => content,
                None => minifier.minify(&concatenate(&files, FILE_SEPARATOR)?)?,
            };
            renderer.render(&content, &output_file)?;
            content
        };

        let path = if hash_in_file_name {
            tag_path
        } else {
            append_query_param(&tag_path, &bundle.hash_key, &hasher.hash(&content))
        };
        Ok(bundle.policy.template.render(attributes, &path))
    }
}
