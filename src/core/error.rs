//! Build error types.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal build failures. Every variant aborts the whole build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("empty reference (resolving from `{}`)", dir.display())]
    InvalidReference { dir: PathBuf },

    #[error("can't open file: {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: failed to read file", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to download: {url} error:{exit_code}")]
    DownloadFailed { url: String, exit_code: i32 },

    #[error("failed to run downloader for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{}: failed to write", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

impl BuildError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }
}
