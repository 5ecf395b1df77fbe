//! Script and style concatenation, namespace script, source map.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{BuildError, BuildResult, Category, Layout};
use crate::embed::{LOAD_TEMPLATE_JS, USE_STRICT};
use crate::graph::ResourceGraph;
use crate::sourcemap::{SourceMap, SourceMapDocument};
use crate::transform::{compact, strip_lines};
use crate::utils::hash;
use crate::utils::path::relative_link;

use super::output::{Output, open};

const MODULE_OPEN: &str = "(function(){\n";
const MODULE_CLOSE: &str = "})();\n";

// ============================================================================
// Namespace script
// ============================================================================

/// Source of the namespace initialization script.
///
/// Top-level names become `var a={};`, dotted ones `a.b={};`. Names are
/// sorted, so every parent is declared before its children.
pub fn namespace_script(graph: &ResourceGraph) -> String {
    let mut js = String::from(USE_STRICT);
    for name in &graph.namespaces {
        if name.contains('.') {
            js.push_str(&format!("{name}={{}};\n"));
        } else {
            js.push_str(&format!("var {name}={{}};\n"));
        }
    }
    if !graph.get(Category::HtmlTemplate).is_empty() {
        js.push_str(LOAD_TEMPLATE_JS);
    }
    js
}

/// Write the namespace script for `output` into the cache directory.
///
/// The file is named by the hash of the output path, so every page has its
/// own and rebuilding a page overwrites it.
pub fn write_namespace_script(
    graph: &ResourceGraph,
    cache_dir: &Path,
    output: &Path,
) -> BuildResult<PathBuf> {
    fs::create_dir_all(cache_dir).map_err(|e| BuildError::write(cache_dir, e))?;
    let name = hash::hex_name(output.as_os_str().as_encoded_bytes());
    let path = cache_dir.join(format!("{name}.js"));
    fs::write(&path, namespace_script(graph)).map_err(|e| BuildError::write(&path, e))?;
    Ok(path)
}

// ============================================================================
// Concatenation
// ============================================================================

/// Namespace script first, then every script resource in order.
fn script_sources<'a>(
    graph: &'a ResourceGraph,
    namespace: &'a Path,
) -> impl Iterator<Item = &'a Path> {
    std::iter::once(namespace).chain(graph.scripts().iter().map(PathBuf::as_path))
}

/// Concatenate all scripts with the line-stripping policy.
pub fn write_scripts(
    out: &mut Output,
    graph: &ResourceGraph,
    namespace: &Path,
) -> BuildResult<()> {
    for source in script_sources(graph, namespace) {
        let module = graph.is_module(source);
        if module {
            out.text(MODULE_OPEN)?;
        }
        let reader = open(source)?;
        strip_lines(reader, out).map_err(|e| out.source_error(source, e))?;
        if module {
            out.text(MODULE_CLOSE)?;
        }
    }
    Ok(())
}

/// Concatenate all scripts with the compacting policy, returning the mappings.
///
/// Source index 0 is the namespace script, script resources follow in order.
pub fn write_scripts_mapped(
    out: &mut Output,
    graph: &ResourceGraph,
    namespace: &Path,
) -> BuildResult<String> {
    let mut map = SourceMap::new();
    for (index, source) in script_sources(graph, namespace).enumerate() {
        let module = graph.is_module(source);
        if module {
            out.text(MODULE_OPEN)?;
            map.add_line();
        }
        let reader = open(source)?;
        compact(reader, out, index as i64, &mut map).map_err(|e| out.source_error(source, e))?;
        if module {
            out.text(MODULE_CLOSE)?;
            map.add_line();
        }
    }
    Ok(map.mappings().to_string())
}

/// Concatenate all styles with the line-stripping policy.
pub fn write_styles(out: &mut Output, graph: &ResourceGraph) -> BuildResult<()> {
    for source in graph.styles() {
        let reader = open(source)?;
        strip_lines(reader, out).map_err(|e| out.source_error(source, e))?;
    }
    Ok(())
}

// ============================================================================
// Standard script file
// ============================================================================

/// Write `<base>.js` with a trailing source map reference and `<base>.map`.
pub fn write_script_with_map(
    layout: &Layout,
    graph: &ResourceGraph,
    namespace: &Path,
) -> BuildResult<Vec<PathBuf>> {
    let mut out = Output::create(&layout.script)?;
    let mappings = write_scripts_mapped(&mut out, graph, namespace)?;
    out.text(&format!("//# sourceMappingURL={}\n", layout.source_map_name()))?;
    let script = out.finish()?;

    let sources = script_sources(graph, namespace)
        .map(|source| relative_link(&layout.script, source))
        .collect();
    let file = script
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let document = SourceMapDocument::new(file, sources, mappings);

    let mut map = Output::create(&layout.source_map)?;
    document
        .write_to(&mut map)
        .map_err(|e| BuildError::write(&layout.source_map, e.into()))?;
    let map = map.finish()?;

    Ok(vec![script, map])
}
