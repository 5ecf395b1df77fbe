//! Assembler: writes the artifacts of one build mode from a resource graph.
//!
//! # Outputs per mode
//!
//! | mode      | outputs                                             |
//! |-----------|-----------------------------------------------------|
//! | `script`  | `<base>.js` (line-stripped)                         |
//! | `html`    | `<base>.html` linking `<base>.css` and `<base>.js`  |
//! | `packed`  | `<base>.html` with inline style and script blocks   |
//! | `page`    | `<base>.html`, `<base>.js` + `<base>.map`, `<base>.css` |
//! | `devel`   | `<base>.html` linking every original resource       |
//! | `develsl` | `<base>.html` linking symlinks in `sres/`           |
//!
//! Image, file and config resources are copied in every mode.
//! Every mode first writes the namespace script into the cache directory.

mod copy;
pub mod depfile;
mod output;
mod page;
mod script;

use copy::{SymlinkDir, copy_all};
use output::Output;
use page::{Injection, write_page};

use std::path::{Path, PathBuf};

use crate::core::{BuildMode, BuildResult, Category, Layout};
use crate::debug;
use crate::graph::ResourceGraph;

/// Writes the outputs of one page.
pub struct Builder<'a> {
    graph: &'a ResourceGraph,
    layout: &'a Layout,
    cache_dir: &'a Path,
}

impl<'a> Builder<'a> {
    pub fn new(graph: &'a ResourceGraph, layout: &'a Layout, cache_dir: &'a Path) -> Self {
        Self {
            graph,
            layout,
            cache_dir,
        }
    }

    /// Write every artifact of `mode`, returning the generated files.
    ///
    /// Copied assets and symlinks are not included.
    pub fn build(&self, mode: BuildMode) -> BuildResult<Vec<PathBuf>> {
        let graph = self.graph;
        let layout = self.layout;
        let namespace = script::write_namespace_script(graph, self.cache_dir, &layout.base)?;
        debug!("namespace"; "{}", namespace.display());

        let written = match mode {
            BuildMode::ScriptOnly => {
                let mut out = Output::create(&layout.script)?;
                script::write_scripts(&mut out, graph, &namespace)?;
                vec![out.finish()?]
            }
            BuildMode::HtmlOnly => {
                let styles = [layout.style.clone()];
                let scripts = [layout.script.clone()];
                vec![self.page(Injection::Link {
                    styles: &styles,
                    scripts: &scripts,
                })?]
            }
            BuildMode::SinglePageFile => vec![self.page(Injection::Inline {
                namespace: &namespace,
            })?],
            BuildMode::Standard => {
                let styles = [layout.style.clone()];
                let scripts = [layout.script.clone()];
                let mut written = vec![self.page(Injection::Link {
                    styles: &styles,
                    scripts: &scripts,
                })?];
                written.extend(script::write_script_with_map(layout, graph, &namespace)?);

                let mut out = Output::create(&layout.style)?;
                script::write_styles(&mut out, graph)?;
                written.push(out.finish()?);
                written
            }
            BuildMode::Develop => {
                let scripts = develop_scripts(namespace, graph.scripts().to_vec());
                vec![self.page(Injection::Link {
                    styles: graph.styles(),
                    scripts: &scripts,
                })?]
            }
            BuildMode::DevelopSymlinked => {
                let mut links = SymlinkDir::recreate(&layout.symlink_dir)?;
                let styles = links.link_all(graph.styles())?;
                let scripts = develop_scripts(namespace, links.link_all(graph.scripts())?);
                vec![self.page(Injection::Link {
                    styles: &styles,
                    scripts: &scripts,
                })?]
            }
        };

        self.copy_assets()?;
        Ok(written)
    }

    fn page(&self, injection: Injection<'_>) -> BuildResult<PathBuf> {
        let mut out = Output::create(&self.layout.page)?;
        write_page(&mut out, self.graph, injection)?;
        out.finish()
    }

    /// Copy image, file and config resources next to the page.
    fn copy_assets(&self) -> BuildResult<()> {
        let targets = [
            (Category::Image, &self.layout.image_dir),
            (Category::File, &self.layout.file_dir),
            (Category::Config, &self.layout.config_dir),
        ];
        for (category, dir) in targets {
            let copied = copy_all(self.graph.get(category), dir)?;
            if copied > 0 {
                let name = category.name();
                debug!("copy"; "{} {} resource(s) -> {}", copied, name, dir.display());
            }
        }
        Ok(())
    }
}

/// The namespace script is linked ahead of every script resource.
fn develop_scripts(namespace: PathBuf, scripts: Vec<PathBuf>) -> Vec<PathBuf> {
    std::iter::once(namespace).chain(scripts).collect()
}
