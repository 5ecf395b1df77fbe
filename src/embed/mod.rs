//! Embedded JavaScript snippets.
//!
//! Snippets live next to this module as plain `.js` files and are compiled
//! into the binary with `include_str!`.

/// Directive prologue opening every generated namespace script.
pub const USE_STRICT: &str = "\"use strict\";\n";

/// `loadTemplate(name)`: clone the content of `<TEMPLATE id=name>`.
///
/// Returns the single root element of the template when there is exactly
/// one, the template node itself otherwise.
pub const LOAD_TEMPLATE_JS: &str = include_str!("js/load_template.js");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_template_defines_function() {
        assert!(LOAD_TEMPLATE_JS.starts_with("function loadTemplate(name)"));
        assert!(LOAD_TEMPLATE_JS.ends_with("}\n"));
    }
}
