//! Resource category definitions.

/// Category of a resource, determines how the assembler consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Script file - concatenated (or linked) in discovery order
    Script,
    /// HTML fragment - inserted into the page body
    Html,
    /// Stylesheet - concatenated (or linked) in discovery order
    Style,
    /// Image - copied into the image directory
    Image,
    /// Auxiliary file - copied into the files directory
    File,
    /// Page header fragment - inserted into `<HEAD>`
    PageHeader,
    /// HTML template - wrapped in a `<TEMPLATE>` element
    HtmlTemplate,
    /// Configuration file - copied into the config directory
    Config,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 8;

    /// All categories in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Script,
        Self::Html,
        Self::Style,
        Self::Image,
        Self::File,
        Self::PageHeader,
        Self::HtmlTemplate,
        Self::Config,
    ];

    /// Stable slot index used by the resource table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Category selected by a directive command, if the command appends a resource.
    ///
    /// `require`, `lang` and `namespace` are handled by the parser itself.
    pub fn from_directive(command: &str) -> Option<Self> {
        match command {
            "html" => Some(Self::Html),
            "template" => Some(Self::HtmlTemplate),
            "style" => Some(Self::Style),
            "image" => Some(Self::Image),
            "file" => Some(Self::File),
            "config" => Some(Self::Config),
            "head" => Some(Self::PageHeader),
            _ => None,
        }
    }

    /// Display name for this category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Html => "html",
            Self::Style => "style",
            Self::Image => "image",
            Self::File => "file",
            Self::PageHeader => "head",
            Self::HtmlTemplate => "template",
            Self::Config => "config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_from_directive() {
        assert_eq!(Category::from_directive("style"), Some(Category::Style));
        assert_eq!(Category::from_directive("head"), Some(Category::PageHeader));
        assert_eq!(
            Category::from_directive("template"),
            Some(Category::HtmlTemplate)
        );
        assert_eq!(Category::from_directive("require"), None);
        assert_eq!(Category::from_directive("Style"), None);
    }
}
