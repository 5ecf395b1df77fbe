//! Directive parser: root file → resource graph.
//!
//! Depth-first over `require` directives. Every file entered during the
//! traversal is remembered, and a file reached again is treated as already
//! satisfied, so cycles terminate and shared dependencies are emitted once.
//! Identity is the path as resolved (joined, not normalized).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use super::{Directive, ResourceGraph};
use crate::core::{BuildError, BuildResult, Category};
use crate::debug;
use crate::resolve::{Fetch, Resolver};

/// Parse `root` and everything it requires.
pub fn parse<F: Fetch>(root: &Path, resolver: &Resolver<F>) -> BuildResult<ResourceGraph> {
    let mut parser = DirectiveParser::new(resolver);
    parser.parse_file(root)?;
    Ok(parser.finish())
}

/// Builds a [`ResourceGraph`] by reading directive comments.
pub struct DirectiveParser<'r, F> {
    resolver: &'r Resolver<F>,
    graph: ResourceGraph,
    /// Files entered so far in this traversal.
    visited: FxHashSet<PathBuf>,
}

impl<'r, F: Fetch> DirectiveParser<'r, F> {
    pub fn new(resolver: &'r Resolver<F>) -> Self {
        Self {
            resolver,
            graph: ResourceGraph::new(),
            visited: FxHashSet::default(),
        }
    }

    /// Parse one file, recursing into its requires before continuing.
    ///
    /// The file itself is appended to the script list after all of its
    /// directives, so its code follows everything it required.
    pub fn parse_file(&mut self, file: &Path) -> BuildResult<()> {
        if !self.visited.insert(file.to_path_buf()) {
            debug!("parse"; "already included: {}", file.display());
            return Ok(());
        }
        debug!("parse"; "{}", file.display());

        let reader = File::open(file)
            .map(BufReader::new)
            .map_err(|e| BuildError::open(file, e))?;
        let dir = file.parent().unwrap_or_else(|| Path::new(""));

        for line in reader.split(b'\n') {
            let line = line.map_err(|e| BuildError::read(file, e))?;
            let text = String::from_utf8_lossy(&line);
            let Some(directive) = Directive::parse(text.trim_end_matches('\r')) else {
                continue;
            };
            self.apply(file, dir, directive)?;
        }

        self.graph.resources.push(Category::Script, file.to_path_buf());
        Ok(())
    }

    fn apply(&mut self, file: &Path, dir: &Path, directive: Directive<'_>) -> BuildResult<()> {
        match directive {
            Directive::Require(reference) => {
                let required = self.resolver.resolve(dir, reference)?;
                self.parse_file(&required)?;
            }
            Directive::Resource(category, reference) => {
                let resource = self.resolver.resolve(dir, reference)?;
                debug!(category.name(); "{}", resource.display());
                self.graph.resources.push(category, resource);
            }
            Directive::Lang(lang) => self.graph.lang = Some(lang.to_string()),
            Directive::Namespace(namespace) => self.graph.add_namespace(file, namespace),
        }
        Ok(())
    }

    /// Finish parsing and hand out the graph.
    pub fn finish(self) -> ResourceGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Fetcher that must never be called.
    struct NoFetch;

    impl Fetch for NoFetch {
        fn fetch(&self, url: &str, _target: &Path) -> BuildResult<i32> {
            panic!("unexpected fetch of {url}");
        }
    }

    /// Fetcher serving fixed content for any URL.
    struct StaticFetch(&'static str);

    impl Fetch for StaticFetch {
        fn fetch(&self, _url: &str, target: &Path) -> BuildResult<i32> {
            fs::write(target, self.0).unwrap();
            Ok(0)
        }
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn parse_root(root: &Path) -> BuildResult<ResourceGraph> {
        let resolver = Resolver::new("/nonexistent-cache", NoFetch);
        parse(root, &resolver)
    }

    #[test]
    fn test_script_order_follows_requires() {
        let dir = TempDir::new().unwrap();
        let d = dir.path();
        write(d, "a.js", "//@require b.js\na();\n");
        write(d, "b.js", "//@require c.js\nb();\n");
        write(d, "c.js", "c();\n");
        let root = write(d, "main.js", "//@require a.js\n//@require c.js\nmain();\n");

        let graph = parse_root(&root).unwrap();
        assert_eq!(
            graph.scripts(),
            &[d.join("c.js"), d.join("b.js"), d.join("a.js"), d.join("main.js")]
        );
    }

    #[test]
    fn test_categories_and_lang() {
        let dir = TempDir::new().unwrap();
        let d = dir.path();
        let root = write(
            d,
            "main.js",
            "//@style css/a.css\n\
             //@html body.html\n\
             //@template tpl/row.html\n\
             //@image logo.png\n\
             //@file data.bin\n\
             //@config app.json\n\
             //@head meta.html\n\
             //@lang en\n\
             //@lang cs\n\
             //@bogus whatever\n\
             code();\n",
        );

        let graph = parse_root(&root).unwrap();
        assert_eq!(graph.styles(), &[d.join("css/a.css")]);
        assert_eq!(graph.get(Category::Html), &[d.join("body.html")]);
        assert_eq!(graph.get(Category::HtmlTemplate), &[d.join("tpl/row.html")]);
        assert_eq!(graph.get(Category::Image), &[d.join("logo.png")]);
        assert_eq!(graph.get(Category::File), &[d.join("data.bin")]);
        assert_eq!(graph.get(Category::Config), &[d.join("app.json")]);
        assert_eq!(graph.get(Category::PageHeader), &[d.join("meta.html")]);
        assert_eq!(graph.lang.as_deref(), Some("cs"));
        assert_eq!(graph.scripts(), &[root]);
    }

    #[test]
    fn test_self_require_is_truncated() {
        let dir = TempDir::new().unwrap();
        let d = dir.path();
        let plain = write(d, "plain.js", "//@style s.css\nx();\n");
        let cyclic = write(d, "cyclic.js", "//@style s.css\n//@require cyclic.js\nx();\n");

        let expected = parse_root(&plain).unwrap();
        let graph = parse_root(&cyclic).unwrap();
        assert_eq!(graph.styles(), expected.styles());
        assert_eq!(graph.scripts(), &[cyclic]);
    }

    #[test]
    fn test_transitive_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        let d = dir.path();
        write(d, "a.js", "//@require b.js\n");
        write(d, "b.js", "//@require a.js\n");

        let graph = parse_root(&d.join("a.js")).unwrap();
        assert_eq!(graph.scripts(), &[d.join("b.js"), d.join("a.js")]);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let d = dir.path();
        write(d, "lib.js", "//@style lib.css\n//@namespace lib.util\n");
        let root = write(d, "main.js", "//@style main.css\n//@require lib.js\n");

        let first = parse_root(&root).unwrap();
        let second = parse_root(&root).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.styles(), &[d.join("main.css"), d.join("lib.css")]);
    }

    #[test]
    fn test_namespace_marks_module() {
        let dir = TempDir::new().unwrap();
        let d = dir.path();
        let lib = write(d, "lib.js", "//@namespace a.b.c\n");
        let root = write(d, "main.js", "//@require lib.js\n//@namespace a\n");

        let graph = parse_root(&root).unwrap();
        assert!(graph.is_module(&lib));
        assert!(graph.is_module(&root));
        let names: Vec<_> = graph.namespaces.iter().cloned().collect();
        assert_eq!(names, vec!["a", "a.b", "a.b.c"]);
    }

    #[test]
    fn test_missing_required_file() {
        let dir = TempDir::new().unwrap();
        let root = write(dir.path(), "main.js", "//@require missing.js\n");

        let err = parse_root(&root).unwrap_err();
        match err {
            BuildError::FileOpen { path, .. } => assert_eq!(path, dir.path().join("missing.js")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_reference_aborts() {
        let dir = TempDir::new().unwrap();
        let root = write(dir.path(), "main.js", "//@style\n");
        let err = parse_root(&root).unwrap_err();
        assert!(matches!(err, BuildError::InvalidReference { .. }));
    }

    #[test]
    fn test_remote_require_is_parsed_from_cache() {
        let dir = TempDir::new().unwrap();
        let d = dir.path();
        let root = write(d, "main.js", "//@require https://cdn.example.com/lib.js\n");
        let resolver = Resolver::new(d.join("cache"), StaticFetch("//@style remote.css\n"));

        let graph = parse(&root, &resolver).unwrap();
        let scripts = graph.scripts();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].starts_with(d.join("cache")));
        // Relative references inside a cached file resolve against the cache
        assert_eq!(graph.styles(), &[d.join("cache").join("remote.css")]);
    }
}
