//! `[fetch]` section configuration.
//!
//! The downloader is an external command run once per uncached URL.
//! `$PAGEPACK_URL` and `$PAGEPACK_TARGET` are substituted in every argument.
//!
//! # Example
//!
//! ```toml
//! [fetch]
//! command = ["wget", "-q", "-O", "$PAGEPACK_TARGET", "$PAGEPACK_URL"]
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Placeholder replaced with the remote URL.
pub const URL_VAR: &str = "$PAGEPACK_URL";
/// Placeholder replaced with the cache file path.
pub const TARGET_VAR: &str = "$PAGEPACK_TARGET";

/// External downloader settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FetchConfig {
    /// Command line, program first.
    pub command: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            command: [
                "curl",
                "-sSfL",
                "--max-time",
                "300",
                "-o",
                TARGET_VAR,
                URL_VAR,
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl FetchConfig {
    /// Substitute the URL and target placeholders in every argument.
    pub fn resolve_args(&self, url: &str, target: &str) -> Vec<String> {
        self.command
            .iter()
            .map(|arg| arg.replace(TARGET_VAR, target).replace(URL_VAR, url))
            .collect()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(program) = self.command.first() else {
            diag.error("fetch.command", "must not be empty");
            return;
        };

        if which::which(program).is_err() {
            diag.warn(
                "fetch.command",
                format!("`{program}` not found in PATH, remote references will fail"),
            );
        }

        if !self.command.iter().any(|arg| arg.contains(URL_VAR)) {
            diag.warn(
                "fetch.command",
                format!("no `{URL_VAR}` placeholder, the URL is never passed"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_args_default() {
        let fetch = FetchConfig::default();
        let args = fetch.resolve_args("https://example.com/a.js", "/cache/0123.js");
        assert_eq!(args[0], "curl");
        assert!(args.contains(&"/cache/0123.js".to_string()));
        assert_eq!(args.last().unwrap(), "https://example.com/a.js");
    }

    #[test]
    fn test_resolve_args_embedded_placeholder() {
        let fetch = FetchConfig {
            command: vec!["fetch".into(), "--out=$PAGEPACK_TARGET".into()],
        };
        let args = fetch.resolve_args("u", "/t");
        assert_eq!(args, vec!["fetch".to_string(), "--out=/t".to_string()]);
    }

    #[test]
    fn test_validate_empty_command() {
        let mut diag = ConfigDiagnostics::new();
        FetchConfig { command: vec![] }.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
