//! Makefile-style dependency file.
//!
//! ```text
//! www/index: src/main.js src/lib/util.js src/css/main.css src/img/logo.png
//! ```

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::core::{BuildError, BuildResult};
use crate::graph::ResourceGraph;
use crate::utils::path::relative_link;

/// Render the rule: `output` depends on every resource of the graph.
///
/// Resources are listed category by category in discovery order, each at
/// most once. Paths are relative to the directory of `depfile`.
pub fn render(depfile: &Path, output: &Path, graph: &ResourceGraph) -> String {
    let mut seen = FxHashSet::default();
    let mut rule = escape(&relative_link(depfile, output));
    rule.push(':');
    for (_, resource) in graph.resources.iter() {
        if !seen.insert(resource.as_path()) {
            continue;
        }
        rule.push(' ');
        rule.push_str(&escape(&relative_link(depfile, resource)));
    }
    rule.push('\n');
    rule
}

/// Write the dependency file.
pub fn write(depfile: &Path, output: &Path, graph: &ResourceGraph) -> BuildResult<()> {
    if let Some(parent) = depfile.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::write(parent, e))?;
    }
    fs::write(depfile, render(depfile, output, graph)).map_err(|e| BuildError::write(depfile, e))
}

fn escape(path: &str) -> String {
    path.replace(' ', "\\ ")
}
