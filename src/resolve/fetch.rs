//! Remote resource download through an external command.

use std::path::{Path, PathBuf};

use crate::config::FetchConfig;
use crate::core::{BuildError, BuildResult};
use crate::utils::exec::Cmd;

/// Downloads a URL into a local file.
///
/// Implementations block until the download finishes and report the exit
/// status: `0` means `target` now holds the content of `url`.
pub trait Fetch {
    fn fetch(&self, url: &str, target: &Path) -> BuildResult<i32>;
}

/// Fetcher running the configured downloader command (curl by default).
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    config: FetchConfig,
    cwd: PathBuf,
}

impl CommandFetcher {
    /// Create a fetcher that runs its command inside `cwd` (the cache directory).
    pub fn new(config: FetchConfig, cwd: impl Into<PathBuf>) -> Self {
        Self {
            config,
            cwd: cwd.into(),
        }
    }
}

impl Fetch for CommandFetcher {
    fn fetch(&self, url: &str, target: &Path) -> BuildResult<i32> {
        let args = self
            .config
            .resolve_args(url, &target.to_string_lossy());

        let Some((program, rest)) = args.split_first() else {
            return Err(BuildError::Fetch {
                url: url.to_string(),
                reason: "empty fetch command".into(),
            });
        };

        let output = Cmd::new(program)
            .args(rest)
            .cwd(&self.cwd)
            .output()
            .map_err(|e| BuildError::Fetch {
                url: url.to_string(),
                reason: format!("{e:#}"),
            })?;

        // Killed by a signal: no exit code, report as a generic failure
        Ok(output.status.code().unwrap_or(-1))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh_fetcher(script: &str, cwd: &Path) -> CommandFetcher {
        let config = FetchConfig {
            command: vec![
                "sh".into(),
                "-c".into(),
                script.into(),
                "sh".into(),
                "$PAGEPACK_TARGET".into(),
                "$PAGEPACK_URL".into(),
            ],
        };
        CommandFetcher::new(config, cwd)
    }

    #[test]
    fn test_command_fetcher_success() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.js");
        let fetcher = sh_fetcher("printf '%s' \"$2\" > \"$1\"", dir.path());

        let status = fetcher.fetch("https://example.com/a.js", &target).unwrap();
        assert_eq!(status, 0);
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "https://example.com/a.js"
        );
    }

    #[test]
    fn test_command_fetcher_reports_status() {
        let dir = TempDir::new().unwrap();
        let fetcher = sh_fetcher("exit 22", dir.path());
        let status = fetcher
            .fetch("https://example.com/a.js", &dir.path().join("x"))
            .unwrap();
        assert_eq!(status, 22);
    }

    #[test]
    fn test_command_fetcher_missing_program() {
        let dir = TempDir::new().unwrap();
        let fetcher = CommandFetcher::new(
            FetchConfig {
                command: vec!["pagepack-no-such-downloader".into()],
            },
            dir.path(),
        );
        let err = fetcher.fetch("https://x/y", &dir.path().join("y")).unwrap_err();
        assert!(matches!(err, BuildError::Fetch { .. }));
    }
}
