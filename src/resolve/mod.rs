//! Reference resolution: directive argument → local file path.
//!
//! | Reference                 | Result                                   |
//! |---------------------------|------------------------------------------|
//! | `/abs/path.js`            | unchanged                                |
//! | `http(s)://host/lib.js`   | cache file, downloaded when missing      |
//! | `rel/path.js`             | joined to the directory of the directive |
//!
//! Cache files are named by a 16-digit hex hash of the URL plus the URL's
//! extension. Presence on disk is the only cache-hit signal.

mod fetch;

pub use fetch::{CommandFetcher, Fetch};

use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::core::{BuildError, BuildResult};
use crate::utils::hash;
use crate::{debug, log};

/// Resolves directive references, fetching remote ones into the cache.
pub struct Resolver<F> {
    cache_dir: PathBuf,
    fetcher: F,
}

impl<F: Fetch> Resolver<F> {
    pub fn new(cache_dir: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            fetcher,
        }
    }

    /// Resolve `reference` found in a file located in `base_dir`.
    pub fn resolve(&self, base_dir: &Path, reference: &str) -> BuildResult<PathBuf> {
        if reference.is_empty() {
            return Err(BuildError::InvalidReference {
                dir: base_dir.to_path_buf(),
            });
        }

        if reference.starts_with('/') {
            return Ok(PathBuf::from(reference));
        }

        if is_remote(reference) {
            return self.resolve_remote(reference);
        }

        Ok(base_dir.join(reference))
    }

    /// Map a URL to its cache file, downloading it when not cached yet.
    fn resolve_remote(&self, url: &str) -> BuildResult<PathBuf> {
        let target = self.cache_file(url);
        if target.exists() {
            debug!("cache"; "{} -> {}", url, target.display());
            return Ok(target);
        }

        fs::create_dir_all(&self.cache_dir).map_err(|e| BuildError::write(&self.cache_dir, e))?;

        log!("download"; "{}", url);
        let exit_code = self.fetcher.fetch(url, &target)?;
        if exit_code != 0 {
            // Do not leave a partial file behind: it would count as a cache hit
            let _ = fs::remove_file(&target);
            return Err(BuildError::DownloadFailed {
                url: url.to_string(),
                exit_code,
            });
        }
        Ok(target)
    }

    /// Deterministic cache path for `name` (a URL or any other key).
    pub fn cache_file(&self, name: &str) -> PathBuf {
        self.cache_dir.join(cache_file_name(name))
    }
}

/// Check if a reference points to a remote resource.
#[inline]
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// Cache file name: hex hash of the whole string plus the original extension.
pub fn cache_file_name(name: &str) -> String {
    let mut file = hash::hex_name(name);
    if let Some(ext) = extension_of(name) {
        file.push('.');
        file.push_str(&ext);
    }
    file
}

/// Extension of the last path segment, when it is unambiguous.
///
/// URLs are parsed so query strings and fragments never leak into the
/// extension; anything else is treated as a plain path.
fn extension_of(name: &str) -> Option<String> {
    let segment = match Url::parse(name) {
        Ok(url) if url.has_host() => url.path_segments()?.next_back()?.to_string(),
        _ => name.rsplit('/').next()?.to_string(),
    };
    let (_, ext) = segment.rsplit_once('.')?;
    let plain = !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric());
    plain.then(|| ext.to_string())
}
