//! Core types shared by every bundle: render mode, errors and the
//! process-wide render context.

mod context;
mod error;
mod lock;
mod mode;

pub use context::{BundleContext, BundleContextBuilder};
pub use error::{BundleError, Result};
pub use lock::KeyLocks;
pub use mode::RenderMode;
