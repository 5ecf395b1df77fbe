//! Directive line recognition.
//!
//! A directive is a line starting with `//@`, followed by a command and
//! optional arguments: `//@style ../css/main.css`. Recognition is purely
//! lexical; unknown commands are ignored.

use crate::core::Category;

/// Marker that starts a directive line.
pub const MARKER: &str = "//@";

/// A recognized directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// Parse another file before continuing the current one.
    Require(&'a str),
    /// Append a resolved resource to a category.
    Resource(Category, &'a str),
    /// Set the page language.
    Lang(&'a str),
    /// Mark the current file as a module declaring a namespace.
    Namespace(&'a str),
}

impl<'a> Directive<'a> {
    /// Recognize a directive line. Returns `None` for payload lines and
    /// unknown commands.
    pub fn parse(line: &'a str) -> Option<Self> {
        if line.len() <= MARKER.len() {
            return None;
        }
        let body = line.strip_prefix(MARKER)?.trim();
        let (command, args) = match body.split_once(' ') {
            Some((command, args)) => (command, args.trim()),
            None => (body, ""),
        };

        match command {
            "require" => Some(Self::Require(args)),
            "lang" => Some(Self::Lang(args)),
            "namespace" => Some(Self::Namespace(args)),
            _ => Category::from_directive(command).map(|c| Self::Resource(c, args)),
        }
    }
}
