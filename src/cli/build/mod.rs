//! Build orchestration.
//!
//! Phases:
//! - **Paths** - absolutize input and output, derive the layout
//! - **Parse** - resolve the root file into a resource graph
//! - **Assemble** - write the artifacts of the selected mode
//! - **Depfile** - record every consumed resource for the calling build system


use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::builder::{Builder, depfile};
use crate::cli::Cli;
use crate::config::PackConfig;
use crate::core::Layout;
use crate::graph;
use crate::resolve::{CommandFetcher, Resolver};
use crate::utils::path::absolutize;
use crate::{debug, log};

/// Run one build as described by the command line.
///
/// Returns the absolute output base path.
pub fn run_build(cli: &Cli, config: &PackConfig, cwd: &Path) -> Result<PathBuf> {
    let input = absolutize(&cli.input, cwd);
    let output = absolutize(&cli.output, cwd);
    let output_dir = output.parent().unwrap_or(cwd);

    let cache_dir = match &cli.cache_dir {
        Some(dir) => absolutize(dir, cwd),
        None => config.cache_dir(output_dir),
    };
    debug!("build"; "mode {}, cache {}", cli.mode, cache_dir.display());

    let resolver = Resolver::new(
        &cache_dir,
        CommandFetcher::new(config.fetch.clone(), &cache_dir),
    );
    let graph = graph::parse(&input, &resolver)
        .with_context(|| format!("failed to parse {}", input.display()))?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let layout = Layout::new(&output, &config.output);
    let written = Builder::new(&graph, &layout, &cache_dir)
        .build(cli.mode)
        .with_context(|| format!("failed to build {}", output.display()))?;
    for path in &written {
        log!("write"; "{}", path.display());
    }

    if let Some(path) = depfile_path(cli, &output, cwd) {
        depfile::write(&path, &output, &graph)?;
        debug!("depfile"; "{}", path.display());
    }

    Ok(output)
}

/// Dependency file location: explicit, or `<output file name>.d` in `cwd`.
fn depfile_path(cli: &Cli, output: &Path, cwd: &Path) -> Option<PathBuf> {
    if cli.no_depfile {
        return None;
    }
    if let Some(path) = &cli.depfile {
        return Some(absolutize(path, cwd));
    }
    let mut name = output.file_name()?.to_os_string();
    name.push(".d");
    Some(cwd.join(name))
}
