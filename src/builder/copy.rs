//! Asset copying and the symlinked development layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rustc_hash::FxHashSet;

use crate::core::{BuildError, BuildResult};
use crate::debug;

/// Get the modification time of a file, `None` when it can't be read.
fn mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Copy `from` to `to` when the source is strictly newer.
///
/// A missing destination counts as older than anything. Returns whether a
/// copy happened.
pub fn copy_newer(from: &Path, to: &Path) -> BuildResult<bool> {
    let source_time = from
        .metadata()
        .and_then(|m| m.modified())
        .map_err(|e| BuildError::open(from, e))?;

    if let Some(target_time) = mtime(to)
        && source_time <= target_time
    {
        debug!("copy"; "up to date: {}", to.display());
        return Ok(false);
    }

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::write(parent, e))?;
    }
    fs::copy(from, to).map_err(|e| BuildError::write(to, e))?;
    debug!("copy"; "{} -> {}", from.display(), to.display());
    Ok(true)
}

/// Copy every resource into `dir` under its file name, newer sources only.
pub fn copy_all(resources: &[PathBuf], dir: &Path) -> BuildResult<usize> {
    let mut copied = 0;
    for resource in resources {
        let Some(name) = resource.file_name() else {
            continue;
        };
        if copy_newer(resource, &dir.join(name))? {
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Symlinked layout
// ============================================================================

/// Clears and recreates the symlink directory, then links resources into it.
pub struct SymlinkDir {
    dir: PathBuf,
    used: FxHashSet<String>,
}

impl SymlinkDir {
    /// Start with an empty directory.
    pub fn recreate(dir: &Path) -> BuildResult<Self> {
        match fs::remove_dir_all(dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(BuildError::write(dir, e)),
        }
        fs::create_dir_all(dir).map_err(|e| BuildError::write(dir, e))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            used: FxHashSet::default(),
        })
    }

    /// Link every resource, returning the link paths in the same order.
    pub fn link_all(&mut self, resources: &[PathBuf]) -> BuildResult<Vec<PathBuf>> {
        resources.iter().map(|r| self.link(r)).collect()
    }

    /// Create a symlink to `target` and return its path.
    ///
    /// Links are named after the target file; a taken name gets a numeric
    /// suffix before the extension (`util.1.js`).
    pub fn link(&mut self, target: &Path) -> BuildResult<PathBuf> {
        let name = self.unique_name(target);
        let link = self.dir.join(&name);
        symlink_file(target, &link).map_err(|e| BuildError::write(&link, e))?;
        debug!("link"; "{} -> {}", link.display(), target.display());
        Ok(link)
    }

    fn unique_name(&mut self, target: &Path) -> String {
        let stem = target
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = target.extension().map(|e| e.to_string_lossy().into_owned());
        let compose = |n: usize| {
            let stem = if n == 0 { stem.clone() } else { format!("{stem}.{n}") };
            match &ext {
                Some(ext) => format!("{stem}.{ext}"),
                None => stem,
            }
        };

        let mut n = 0;
        loop {
            let name = compose(n);
            if self.used.insert(name.clone()) {
                return name;
            }
            n += 1;
        }
    }
}

#[cfg(unix)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_file(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
