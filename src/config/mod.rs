//! Build configuration management for `pagepack.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── cache      # [cache]
//! │   ├── fetch      # [fetch]
//! │   └── output     # [output]
//! ├── error          # ConfigError, ConfigDiagnostics
//! ├── util           # config file discovery
//! └── mod.rs         # PackConfig (this file)
//! ```
//!
//! The file is optional: without one every section takes its defaults.

mod error;
pub mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::{CacheConfig, FetchConfig, OutputConfig};

use crate::{debug, log};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::find_config_file;

/// Default config file name, searched upward from the working directory.
pub const CONFIG_FILE: &str = "pagepack.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pagepack.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackConfig {
    /// Remote download cache
    pub cache: CacheConfig,

    /// External downloader
    pub fetch: FetchConfig,

    /// Auxiliary output directories
    pub output: OutputConfig,
}

impl PackConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `pagepack.toml` is searched
    /// upward from `cwd`, and defaults apply when none is found.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(cwd.join(path)),
            None => find_config_file(Path::new(CONFIG_FILE), cwd),
        };

        let config = match path {
            Some(path) => {
                debug!("config"; "{}", path.display());
                Self::from_path(&path)?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, printing warnings and failing on errors.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.fetch.validate(&mut diag);
        self.output.validate(&mut diag);

        diag.print_warnings();
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Cache directory for builds writing into `output_dir`.
    pub fn cache_dir(&self, output_dir: &Path) -> PathBuf {
        self.cache.resolve(output_dir)
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> PackConfig {
        PackConfig::parse_with_ignored(content).unwrap().0
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse("");
        assert_eq!(config, PackConfig::default());
    }

    #[test]
    fn test_parse_sections() {
        let config = parse(
            r#"
            [cache]
            dir = "/tmp/pp-cache"

            [fetch]
            command = ["wget", "-q", "-O", "$PAGEPACK_TARGET", "$PAGEPACK_URL"]

            [output]
            image_dir = "images"
            "#,
        );

        assert_eq!(config.cache.dir, PathBuf::from("/tmp/pp-cache"));
        assert_eq!(config.fetch.command[0], "wget");
        assert_eq!(config.output.image_dir, "images");
        assert_eq!(config.output.file_dir, "files");
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) = PackConfig::parse_with_ignored(
            r#"
            [cache]
            dir = ".c"
            ttl = 5

            [extra]
            x = 1
            "#,
        )
        .unwrap();
        assert!(ignored.iter().any(|f| f == "cache.ttl"));
        assert!(ignored.iter().any(|f| f == "extra"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PackConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_load_explicit_missing_fails() {
        let dir = TempDir::new().unwrap();
        assert!(PackConfig::load(Some(Path::new("nope.toml")), dir.path()).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_output_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[output]\nconf_dir = \"x\"\nconfig_dir = \"a/b\"\n").unwrap();
        assert!(PackConfig::load(Some(&path), dir.path()).is_err());
    }
}
