//! Asset minification for JS and CSS bundles.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Input that fails to
//! parse is rejected rather than passed through.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use crate::core::{BundleError, Result};

/// Turns concatenated source text into the served artifact.
pub trait Minifier: Send + Sync {
    /// Stable name, part of the render cache key.
    fn name(&self) -> &'static str;

    fn minify(&self, source: &str) -> Result<String>;
}

/// JavaScript minifier (oxc: compress + mangle).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsMinifier;

impl Minifier for JsMinifier {
    fn name(&self) -> &'static str {
        "oxc"
    }

    fn minify(&self, source: &str) -> Result<String> {
        let allocator = Allocator::default();
        // Bundles load through plain <script> tags: top-level names are globals
        // the page may call, so they are neither dropped nor mangled.
        let source_type = SourceType::script();
        let ret = Parser::new(&allocator, source, source_type).parse();
        if !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(BundleError::Minify {
                minifier: self.name(),
                message,
            });
        }
        let mut program = ret.program;
        let options = MinifierOptions {
            mangle: Some(MangleOptions::default()),
            compress: Some(CompressOptions::smallest()),
        };
        let ret = oxc::minifier::Minifier::new(options).minify(&allocator, &mut program);
        let code = Codegen::new()
            .with_options(CodegenOptions {
                minify: true,
                comments: CommentOptions::disabled(),
                ..CodegenOptions::default()
            })
            .with_scoping(ret.scoping)
            .build(&program)
            .code;
        Ok(code)
    }
}

/// CSS minifier (lightningcss).
#[derive(Debug, Clone, Copy, Default)]
pub struct CssMinifier;

impl Minifier for CssMinifier {
    fn name(&self) -> &'static str {
        "lightningcss"
    }

    fn minify(&self, source: &str) -> Result<String> {
        let fail = |message: String| BundleError::Minify {
            minifier: "lightningcss",
            message,
        };
        let stylesheet =
            StyleSheet::parse(source, ParserOptions::default()).map_err(|e| fail(e.to_string()))?;
        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|e| fail(e.to_string()))?;
        Ok(result.code)
    }
}

/// Pass-through, for pre-minified sources or debugging release output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMinifier;

impl Minifier for NullMinifier {
    fn name(&self) -> &'static str {
        "none"
    }

    fn minify(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}
