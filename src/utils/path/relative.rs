//! Relative link computation for generated references.
//!
//! Every `<script src>`, `<link href>` and source map `sources` entry is
//! produced here, so the tie-break rules below are part of the output format.

use std::path::{Component, Path};

/// Path of `link` relative to the directory containing `from`.
///
/// Walks both component sequences while they match. On the first mismatch,
/// one `../` is emitted per remaining directory of `from`, followed by the
/// remaining components of `link` joined by `/`. When `link` is consumed
/// before any mismatch, only its file name is returned.
///
/// # Examples
/// ```ignore
/// assert_eq!(relative_link("/x/y/out.js", "/x/y/z/lib.js"), "z/lib.js");
/// assert_eq!(relative_link("/x/y/out.js", "/x/a/lib.js"), "../a/lib.js");
/// assert_eq!(relative_link("/x/y/out.js", "/x/y/out.js"), "out.js");
/// ```
pub fn relative_link(from: impl AsRef<Path>, link: impl AsRef<Path>) -> String {
    let link = link.as_ref();
    let mut from_iter = from.as_ref().components().peekable();
    let mut link_iter = link.components().peekable();
    let mut result = String::new();

    while let (Some(f), Some(l)) = (from_iter.peek(), link_iter.peek()) {
        if f == l {
            from_iter.next();
            link_iter.next();
            continue;
        }
        // The last remaining component of `from` is its file name.
        let parents = from_iter.by_ref().count().saturating_sub(1);
        result.push_str(&"../".repeat(parents));
        break;
    }

    let rest: Vec<String> = link_iter.map(component_str).collect();
    if rest.is_empty() {
        if let Some(name) = link.file_name() {
            result.push_str(&name.to_string_lossy());
        }
    } else {
        result.push_str(&rest.join("/"));
    }
    result
}

fn component_str(component: Component<'_>) -> String {
    component.as_os_str().to_string_lossy().into_owned()
}
