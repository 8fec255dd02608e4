//! `[render]` section configuration.
//!
//! Defaults applied to every bundle in the file.
//!
//! # Example
//!
//! ```toml
//! [render]
//! mode = "release"          # "debug" emits one tag per source file
//! hash_key = "r"            # Query parameter carrying the content hash
//! only_if_missing = false   # Reuse existing output files as-is
//! lock_timeout = 30         # Seconds to wait for a concurrent render of the same bundle
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bundle::DEFAULT_HASH_KEY;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::core::RenderMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: RenderMode,
    pub hash_key: String,
    pub only_if_missing: bool,
    /// Seconds.
    pub lock_timeout: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Release,
            hash_key: DEFAULT_HASH_KEY.to_string(),
            only_if_missing: false,
            lock_timeout: 30,
        }
    }
}

impl RenderConfig {
    pub const HASH_KEY: FieldPath = FieldPath::new("render.hash_key");
    pub const LOCK_TIMEOUT: FieldPath = FieldPath::new("render.lock_timeout");

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.lock_timeout)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.hash_key.is_empty() {
            diag.error(Self::HASH_KEY, "must not be empty");
        } else if self.hash_key.contains(['?', '&', '=', '#', ' ']) {
            diag.error_with_hint(
                Self::HASH_KEY,
                format!("`{}` is not a valid query parameter name", self.hash_key),
                "use letters, digits, `-` or `_`",
            );
        }
        if self.lock_timeout == 0 {
            diag.error(Self::LOCK_TIMEOUT, "must be at least 1 second");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_render_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.render.mode, RenderMode::Release);
        assert_eq!(config.render.hash_key, "r");
        assert!(!config.render.only_if_missing);
        assert_eq!(config.render.lock_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_render_config_debug_mode() {
        let config = test_parse_config("[render]\nmode = \"debug\"\nhash_key = \"v\"");
        assert_eq!(config.render.mode, RenderMode::Debug);
        assert_eq!(config.render.hash_key, "v");
    }

    #[test]
    fn test_render_config_unknown_mode_is_parse_error() {
        let result: Result<crate::config::TagpackConfig, _> =
            toml::from_str("[render]\nmode = \"fast\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_render_config_validation() {
        let mut diag = ConfigDiagnostics::new();
        let config = RenderConfig {
            hash_key: "a&b".into(),
            lock_timeout: 0,
            ..RenderConfig::default()
        };
        config.validate(&mut diag);
        assert_eq!(diag.len(), 2);

        let mut diag = ConfigDiagnostics::new();
        RenderConfig::default().validate(&mut diag);
        assert!(diag.is_empty());
    }
}
