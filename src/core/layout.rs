//! Output layout: every artifact path derived from one output base path.
//!
//! ```text
//! www/index          ← output base
//! ├── index.html     ← page
//! ├── index.js       ← script
//! ├── index.css      ← style
//! ├── index.map      ← source map
//! ├── img/           ← image resources
//! ├── files/         ← file resources
//! ├── conf/          ← config resources
//! └── sres/          ← symlinked resources (develsl)
//! ```

use std::path::{Path, PathBuf};

use crate::config::OutputConfig;

/// Paths of every artifact a build may produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Output base path as given (extension is replaced per artifact)
    pub base: PathBuf,
    pub page: PathBuf,
    pub script: PathBuf,
    pub style: PathBuf,
    pub source_map: PathBuf,
    pub image_dir: PathBuf,
    pub file_dir: PathBuf,
    pub config_dir: PathBuf,
    pub symlink_dir: PathBuf,
}

impl Layout {
    /// Derive the layout from an output base path.
    pub fn new(base: &Path, output: &OutputConfig) -> Self {
        let parent = base.parent().unwrap_or_else(|| Path::new(""));
        Self {
            base: base.to_path_buf(),
            page: base.with_extension("html"),
            script: base.with_extension("js"),
            style: base.with_extension("css"),
            source_map: base.with_extension("map"),
            image_dir: parent.join(&output.image_dir),
            file_dir: parent.join(&output.file_dir),
            config_dir: parent.join(&output.config_dir),
            symlink_dir: parent.join(&output.symlink_dir),
        }
    }

    /// File name of the source map, as referenced from the script.
    pub fn source_map_name(&self) -> String {
        self.source_map
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_replaces_extension() {
        let layout = Layout::new(Path::new("/srv/www/index.html"), &OutputConfig::default());
        assert_eq!(layout.page, PathBuf::from("/srv/www/index.html"));
        assert_eq!(layout.script, PathBuf::from("/srv/www/index.js"));
        assert_eq!(layout.style, PathBuf::from("/srv/www/index.css"));
        assert_eq!(layout.source_map, PathBuf::from("/srv/www/index.map"));
        assert_eq!(layout.source_map_name(), "index.map");
    }

    #[test]
    fn test_layout_subdirectories() {
        let layout = Layout::new(Path::new("/srv/www/app"), &OutputConfig::default());
        assert_eq!(layout.page, PathBuf::from("/srv/www/app.html"));
        assert_eq!(layout.image_dir, PathBuf::from("/srv/www/img"));
        assert_eq!(layout.file_dir, PathBuf::from("/srv/www/files"));
        assert_eq!(layout.config_dir, PathBuf::from("/srv/www/conf"));
        assert_eq!(layout.symlink_dir, PathBuf::from("/srv/www/sres"));
    }
}
