//! `[cache]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [cache]
//! dir = ".cache"    # relative to the output directory, `~` is expanded
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Remote download cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache directory. Relative paths are resolved against the output's parent.
    pub dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".cache"),
        }
    }
}

impl CacheConfig {
    /// Resolve the cache directory for an output directory.
    pub fn resolve(&self, output_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.dir.to_string_lossy()).into_owned();
        let path = PathBuf::from(expanded);
        if path.is_relative() {
            output_dir.join(path)
        } else {
            path
        }
    }
}
