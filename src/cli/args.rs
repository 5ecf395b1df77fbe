//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::core::BuildMode;

/// Bundle a page from directive-annotated sources
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// What to build
    #[arg(value_enum)]
    pub mode: BuildMode,

    /// Root source file (relative to the current directory)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Output base path; extensions are replaced per artifact
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub output: PathBuf,

    /// Config file path (default: search pagepack.toml upward)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Cache directory for downloaded resources (overrides config)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub cache_dir: Option<PathBuf>,

    /// Dependency file path (default: <output file name>.d in the current directory)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath, conflicts_with = "no_depfile")]
    pub depfile: Option<PathBuf>,

    /// Do not write a dependency file
    #[arg(long)]
    pub no_depfile: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_positionals() {
        let cli = Cli::try_parse_from(["pagepack", "packed", "src/main.js", "www/index"]).unwrap();
        assert_eq!(cli.mode, BuildMode::SinglePageFile);
        assert_eq!(cli.input, PathBuf::from("src/main.js"));
        assert_eq!(cli.output, PathBuf::from("www/index"));
        assert!(cli.depfile.is_none());
        assert!(!cli.no_depfile);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from([
            "pagepack",
            "--verbose",
            "--cache-dir",
            "/tmp/c",
            "-d",
            "out.d",
            "develsl",
            "a.js",
            "b",
        ])
        .unwrap();
        assert_eq!(cli.mode, BuildMode::DevelopSymlinked);
        assert!(cli.verbose);
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/c")));
        assert_eq!(cli.depfile, Some(PathBuf::from("out.d")));
    }

    #[test]
    fn test_unknown_mode_is_usage_error() {
        let err = Cli::try_parse_from(["pagepack", "release", "a.js", "b"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_missing_arguments() {
        assert!(Cli::try_parse_from(["pagepack", "page", "a.js"]).is_err());
        assert!(
            Cli::try_parse_from(["pagepack", "--no-depfile", "-d", "x.d", "page", "a", "b"])
                .is_err()
        );
    }
}
