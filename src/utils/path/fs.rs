//! Path normalization utilities.
//!
//! Provides consistent path handling for command-line inputs:
//! - `absolutize` - make a user-supplied path absolute against a working directory
//! - `weakly_canonical` - canonicalize the existing prefix, fold the rest lexically

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Make a path absolute against `cwd`.
///
/// - Empty path resolves to `cwd` itself
/// - Absolute paths are returned unchanged
/// - Relative paths are joined to `cwd` and weakly canonicalized
///
/// # Example
/// ```ignore
/// let out = absolutize(Path::new("../www/index"), Path::new("/home/me/src"));
/// assert_eq!(out, PathBuf::from("/home/me/www/index"));
/// ```
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return cwd.to_path_buf();
    }
    if path.is_absolute() {
        return path.to_path_buf();
    }
    weakly_canonical(&cwd.join(path))
}

/// Canonicalize the longest existing prefix of `path`, then append the
/// non-existing remainder with `.` and `..` folded lexically.
pub fn weakly_canonical(path: &Path) -> PathBuf {
    let mut existing = path.to_path_buf();
    let mut tail: Vec<OsString> = Vec::new();

    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            for name in tail.iter().rev() {
                resolved.push(name);
            }
            return lexical_normalize(&resolved);
        }

        match (existing.file_name(), existing.parent()) {
            (Some(name), Some(parent)) => {
                tail.push(name.to_os_string());
                existing = parent.to_path_buf();
            }
            _ => return lexical_normalize(path),
        }
    }
}

/// Fold `.` and `..` components without touching the filesystem.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolutize_absolute_unchanged() {
        let path = Path::new("/absolute/./path/file.txt");
        assert_eq!(absolutize(path, Path::new("/cwd")), path.to_path_buf());
    }

    #[test]
    fn test_absolutize_empty_is_cwd() {
        assert_eq!(
            absolutize(Path::new(""), Path::new("/cwd")),
            PathBuf::from("/cwd")
        );
    }

    #[test]
    fn test_absolutize_missing_tail_is_folded() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().canonicalize().unwrap();
        std::fs::create_dir_all(cwd.join("src")).unwrap();

        let out = absolutize(Path::new("src/../www/./index"), &cwd);
        assert_eq!(out, cwd.join("www").join("index"));
    }

    #[test]
    fn test_lexical_normalize() {
        assert_eq!(
            lexical_normalize(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(lexical_normalize(Path::new("../x")), PathBuf::from("../x"));
    }
}
