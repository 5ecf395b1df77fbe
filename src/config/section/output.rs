//! `[output]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [output]
//! image_dir = "img"
//! file_dir = "files"
//! config_dir = "conf"
//! symlink_dir = "sres"
//! ```

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Subdirectories created next to the output page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination of `image` resources.
    pub image_dir: String,
    /// Destination of `file` resources.
    pub file_dir: String,
    /// Destination of `config` resources.
    pub config_dir: String,
    /// Symlinked resources for the `develsl` mode (cleared on every build).
    pub symlink_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            image_dir: "img".into(),
            file_dir: "files".into(),
            config_dir: "conf".into(),
            symlink_dir: "sres".into(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let fields = [
            ("output.image_dir", &self.image_dir),
            ("output.file_dir", &self.file_dir),
            ("output.config_dir", &self.config_dir),
            ("output.symlink_dir", &self.symlink_dir),
        ];
        for (field, name) in fields {
            if !is_single_component(name) {
                diag.error(
                    field,
                    format!("`{name}` must be a single directory name"),
                );
            }
        }
    }
}

/// Check that a name is exactly one normal path component.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
