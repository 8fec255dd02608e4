//! `tagpack tags`: print the HTML each bundle renders to.

use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde_json::{Map, Value as JsonValue};

use crate::cli::TagsArgs;
use crate::config::TagpackConfig;
use crate::logger::set_verbose;

pub fn print_tags(config: &TagpackConfig, args: &TagsArgs) -> Result<()> {
    set_verbose(args.render.verbose);

    let selected = config.select(&args.render.bundles)?;
    let ctx = config.context();
    let mode = args.render.mode();

    let rendered: Vec<(String, String)> = selected
        .par_iter()
        .map(|bundle| -> Result<(String, String)> {
            let tags = bundle
                .to_bundle(Arc::clone(&ctx), &config.render)
                .with_mode(mode)
                .render(&bundle.output)
                .with_context(|| format!("{}: rendering to {}", bundle.name, bundle.output))?;
            Ok((bundle.name.clone(), tags))
        })
        .collect::<Result<_>>()?;

    if args.json {
        println!("{}", format_json(&rendered, args.pretty)?);
    } else {
        for (_, tags) in &rendered {
            println!("{}", tags.trim_end());
        }
    }
    Ok(())
}

/// Object of bundle name to tags, in config order.
fn format_json(rendered: &[(String, String)], pretty: bool) -> Result<String> {
    let object: Map<String, JsonValue> = rendered
        .iter()
        .map(|(name, tags)| (name.clone(), JsonValue::String(tags.clone())))
        .collect();
    let value = JsonValue::Object(object);

    let formatted = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(formatted)
}
