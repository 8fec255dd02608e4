//! Debug rendering: one tag per registered asset, sources served unmodified.

use super::render::{RenderPass, concatenate};
use crate::core::Result;
use crate::render::{FileRenderer, Renderer};

/// Separator between embedded resource files written for debug serving.
const EMBEDDED_SEPARATOR: &str = "\n\n\n";

impl RenderPass<'_> {
    pub(super) fn debug(&mut self) -> Result<String> {
        let bundle = self.bundle;
        let mapper = bundle.ctx.mapper();
        let template = &bundle.policy.template;

        let mut out = String::new();
        for (_, group) in bundle.groups.iter() {
            let attributes = group.attribute_string();

            for asset in group.assets() {
                if asset.is_remote() {
                    self.track_local_copy(asset)?;
                } else {
                    let files = self.resolve(asset)?;
                    if asset.is_embedded() {
                        // The tag points at the local path, so the content must exist there.
                        let content = concatenate(&files, EMBEDDED_SEPARATOR)?;
                        FileRenderer.render(&content, &mapper.to_file_system(asset.local_path()))?;
                    }
                }

                out.push_str(&template.render(&attributes, &mapper.expand(asset.local_path())));
                out.push('\n');
            }
        }
        Ok(out)
    }
}
