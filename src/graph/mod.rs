//! Resource graph: the categorized result of parsing a root file.
//!
//! # Architecture
//!
//! ```text
//! ResourceGraph
//! ├── resources: Category → [path, ...]   (discovery order, never sorted)
//! ├── modules:   {file declaring a namespace}
//! ├── namespaces: {a, a.b, a.b.c}         (sorted)
//! └── lang:      last `lang` directive
//! ```
//!
//! The graph is built once per invocation by [`parse`] and read-only afterwards.

mod directive;
mod parser;

pub use directive::Directive;
pub use parser::parse;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::core::Category;

/// Ordered resource lists, one per category.
///
/// Insertion order is the contract: it becomes script concatenation order and
/// therefore execution order. Appending the same path twice keeps both entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resources {
    lists: [Vec<PathBuf>; Category::COUNT],
}

impl Resources {
    /// Append a resource to a category.
    #[inline]
    pub fn push(&mut self, category: Category, path: PathBuf) {
        self.lists[category.index()].push(path);
    }

    /// Resources of a category in discovery order.
    #[inline]
    pub fn get(&self, category: Category) -> &[PathBuf] {
        &self.lists[category.index()]
    }

    /// Iterate all resources, category by category.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &PathBuf)> {
        Category::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter().map(move |p| (c, p)))
    }
}

/// Everything the assembler needs to know about one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceGraph {
    pub resources: Resources,
    /// Files that declared a namespace; wrapped in an isolating closure.
    pub modules: FxHashSet<PathBuf>,
    /// Every namespace prefix; sorted so parents precede children.
    pub namespaces: BTreeSet<String>,
    /// Page language (last `lang` directive wins).
    pub lang: Option<String>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resources of a category in discovery order.
    #[inline]
    pub fn get(&self, category: Category) -> &[PathBuf] {
        self.resources.get(category)
    }

    /// Script resources in concatenation order.
    #[inline]
    pub fn scripts(&self) -> &[PathBuf] {
        self.get(Category::Script)
    }

    /// Style resources in concatenation order.
    #[inline]
    pub fn styles(&self) -> &[PathBuf] {
        self.get(Category::Style)
    }

    /// Check if a script needs an isolating closure.
    #[inline]
    pub fn is_module(&self, path: &Path) -> bool {
        self.modules.contains(path)
    }

    /// Record a namespace declared by `file`, with every dotted prefix.
    ///
    /// `a.b.c` inserts `a`, `a.b` and `a.b.c`.
    pub fn add_namespace(&mut self, file: &Path, namespace: &str) {
        self.modules.insert(file.to_path_buf());
        for (pos, _) in namespace.match_indices('.') {
            self.namespaces.insert(namespace[..pos].to_string());
        }
        self.namespaces.insert(namespace.to_string());
    }
}
