//! Path and URL utilities.
//!
//! - [`fs`]: app-relative path mapping (`PathMapper`, `normalize_path`)
//! - [`route`]: destination URL helpers (`split_query`, `append_query_param`)

pub mod fs;
pub mod route;

pub use fs::{PathMapper, normalize_path};
pub use route::{append_query_param, insert_before_extension, is_glob, split_query};
