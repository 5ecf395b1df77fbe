//! Build mode selection: which artifacts one invocation produces.

use clap::ValueEnum;

/// Build variant, fixed for the whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildMode {
    /// Build script only, no other files are created
    #[value(name = "script")]
    ScriptOnly,
    /// Build only html linking to the conventional script/style files
    #[value(name = "html")]
    HtmlOnly,
    /// Pack everything into a single page
    #[value(name = "packed")]
    SinglePageFile,
    /// Build standard page: html, script (with source map) and style
    #[value(name = "page")]
    Standard,
    /// Page linking every original resource (development)
    #[value(name = "devel")]
    Develop,
    /// Page linking symlinks to every resource (development)
    #[value(name = "develsl")]
    DevelopSymlinked,
}

impl BuildMode {
    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::ScriptOnly => "script",
            Self::HtmlOnly => "html",
            Self::SinglePageFile => "packed",
            Self::Standard => "page",
            Self::Develop => "devel",
            Self::DevelopSymlinked => "develsl",
        }
    }
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
