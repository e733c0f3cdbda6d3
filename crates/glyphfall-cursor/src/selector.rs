//! Interactive element selectors.

use std::fmt;

use crate::element::Element;

/// One compound selector: an optional tag plus required classes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> Self {
        let mut parts = text.split('.');
        let tag = parts
            .next()
            .filter(|tag| !tag.is_empty() && *tag != "*")
            .map(str::to_ascii_lowercase);
        let classes = parts
            .filter(|class| !class.is_empty())
            .map(str::to_string)
            .collect();
        Self { tag, classes }
    }

    fn matches(&self, element: &Element) -> bool {
        let tag_ok = self
            .tag
            .as_deref()
            .is_none_or(|tag| element.tag.eq_ignore_ascii_case(tag));
        tag_ok && self.classes.iter().all(|class| element.has_class(class))
    }
}

/// A comma separated selector list such as `"a, button, .card"`.
///
/// Supports tag names, `*`, `.class` and `tag.class` compounds. Tags match
/// case-insensitively, classes exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractiveSelector {
    source: String,
    compounds: Vec<Compound>,
}

impl InteractiveSelector {
    pub fn parse(source: &str) -> Self {
        let compounds = source
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Compound::parse)
            .collect();
        Self {
            source: source.to_string(),
            compounds,
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.compounds.iter().any(|c| c.matches(element))
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

impl fmt::Display for InteractiveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
