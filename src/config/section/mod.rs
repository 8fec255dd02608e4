//! Configuration section definitions.
//!
//! Each module corresponds to a section in `tagpack.toml`:
//!
//! | Module   | TOML Section  | Purpose                               |
//! |----------|---------------|---------------------------------------|
//! | `site`   | `[site]`      | Physical root, virtual root, scratch  |
//! | `render` | `[render]`    | Mode, hash key, only-if-missing, lock |
//! | `bundle` | `[[bundle]]`  | Bundle registrations                  |

mod bundle;
mod render;
mod site;

pub use bundle::{BundleConfig, GroupConfig, MinifierChoice, RemoteAssetConfig};
pub use render::RenderConfig;
pub use site::SiteConfig;
