//! Asset & group model, minifiers and tag templates.

mod group;
mod kind;
pub mod minify;
mod policy;
mod template;

// Types
pub use group::{Attributes, DEFAULT_GROUP, GroupBundle, GroupMap};
pub use kind::{Asset, AssetSource};
pub use policy::{AssetKind, AssetPolicy};
pub use template::TagTemplate;

// Minifiers
pub use minify::{CssMinifier, JsMinifier, Minifier, NullMinifier};
