//! Page assembly.
//!
//! ```text
//! <!DOCTYPE html><HTML lang=".."><HEAD><META charset="UTF-8" />
//!   page-header resources
//!   ── style injection ──
//! </HEAD><BODY>
//!   html resources
//!   <TEMPLATE id="stem">template resource</TEMPLATE> ...
//!   ── script injection ──
//! </BODY></HTML>
//! ```
//!
//! The skeleton is fixed; only the two injection points vary per mode.

use std::path::{Path, PathBuf};

use crate::core::{BuildResult, Category};
use crate::graph::ResourceGraph;
use crate::utils::path::relative_link;

use super::output::Output;
use super::script::{write_scripts, write_styles};

/// What goes into the style and script injection points.
#[derive(Debug, Clone, Copy)]
pub enum Injection<'a> {
    /// `<link>` / `<script src>` tags, relative to the page.
    Link {
        styles: &'a [PathBuf],
        scripts: &'a [PathBuf],
    },
    /// Concatenated `<style>` and `<script>` blocks.
    Inline { namespace: &'a Path },
}

/// Write the page for `graph` into `out`.
pub fn write_page(
    out: &mut Output,
    graph: &ResourceGraph,
    injection: Injection<'_>,
) -> BuildResult<()> {
    let page = out.path().to_path_buf();

    out.text("<!DOCTYPE html>")?;
    match &graph.lang {
        Some(lang) => out.text(&format!("<HTML lang=\"{lang}\">"))?,
        None => out.text("<HTML>")?,
    }
    out.text("<HEAD><META charset=\"UTF-8\" />")?;
    for header in graph.get(Category::PageHeader) {
        out.insert_file(header)?;
    }

    match injection {
        Injection::Link { styles, .. } => {
            for style in styles {
                out.text(&link_style(&page, style))?;
            }
        }
        Injection::Inline { .. } => {
            out.text("<style type=\"text/css\">\n")?;
            write_styles(out, graph)?;
            out.text("</style>")?;
        }
    }

    out.text("</HEAD><BODY>")?;
    for fragment in graph.get(Category::Html) {
        out.insert_file(fragment)?;
    }
    for template in graph.get(Category::HtmlTemplate) {
        let id = template
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        out.text(&format!("<TEMPLATE id=\"{id}\">"))?;
        out.insert_file(template)?;
        out.text("</TEMPLATE>")?;
    }

    match injection {
        Injection::Link { scripts, .. } => {
            for script in scripts {
                out.text(&link_script(&page, script))?;
            }
        }
        Injection::Inline { namespace } => {
            out.text("<script type=\"text/javascript\">\n")?;
            write_scripts(out, graph, namespace)?;
            out.text("</script>")?;
        }
    }

    out.text("</BODY></HTML>")
}

fn link_style(page: &Path, style: &Path) -> String {
    format!(
        "<link rel=\"stylesheet\" href=\"{}\" />",
        relative_link(page, style)
    )
}

fn link_script(page: &Path, script: &Path) -> String {
    format!(
        "<script type=\"text/javascript\" src=\"{}\"></script>",
        relative_link(page, script)
    )
}
