//! `tagpack build`: render configured bundles as named bundles.
//!
//! Bundles render in parallel against one shared context. Each is persisted
//! under its name, then read back through the registry to report its tags.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;

use crate::asset::AssetKind;
use crate::bundle::Bundle;
use crate::cli::BuildArgs;
use crate::config::{BundleConfig, TagpackConfig};
use crate::core::BundleContext;
use crate::{debug, log};
use crate::logger::{ProgressLine, set_verbose};

pub fn build_bundles(config: &TagpackConfig, args: &BuildArgs) -> Result<()> {
    set_verbose(args.render.verbose);

    let selected = config.select(&args.render.bundles)?;
    if selected.is_empty() {
        log!("build"; "no bundles configured");
        return Ok(());
    }

    let ctx = config.context();
    let progress = create_progress(selected.len(), args.quiet);
    let has_error = AtomicBool::new(false);

    let result = selected.par_iter().try_for_each(|bundle| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        if let Err(e) = build_one(bundle, config, &ctx, args) {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", bundle.name, e);
            }
            return Err(anyhow!("Build failed"));
        }
        if let Some(p) = &progress {
            p.inc("bundles");
        }
        Ok(())
    });

    if let Some(p) = progress {
        p.finish();
    }
    result?;

    if !args.quiet {
        report(&selected, &ctx)?;
    }
    Ok(())
}

fn create_progress(total: usize, quiet: bool) -> Option<ProgressLine> {
    (!quiet).then(|| ProgressLine::new(&[("bundles", total)]))
}

fn build_one(
    bundle: &BundleConfig,
    config: &TagpackConfig,
    ctx: &Arc<BundleContext>,
    args: &BuildArgs,
) -> Result<()> {
    bundle
        .to_bundle(Arc::clone(ctx), &config.render)
        .with_mode(args.render.mode())
        .as_named(&bundle.name, &bundle.output)
        .with_context(|| format!("rendering to {}", bundle.output))
}

/// One line per bundle, read back from the registry.
fn report(selected: &[&BundleConfig], ctx: &Arc<BundleContext>) -> Result<()> {
    for bundle in selected {
        let tags = Bundle::new(bundle.kind, Arc::clone(ctx)).render_named(&bundle.name)?;
        let opening = match bundle.kind {
            AssetKind::Script => "<script",
            AssetKind::Style => "<link",
        };
        let count = tags.matches(opening).count();
        let suffix = if count == 1 { "" } else { "s" };
        log!("build"; "{} → {} ({} tag{})", bundle.name, bundle.output, count, suffix);
        debug!("build"; "{}", tags.trim_end());
    }
    Ok(())
}
