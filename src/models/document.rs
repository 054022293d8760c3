//! Hierarchical rich-text document model
//!
//! A `Document` is a flat list of top-level objects. Each object carries an
//! ordered list of properties; a property either holds a rich-text value or
//! a sequence of child objects. The same property tag may appear more than
//! once under one parent; instances are disambiguated by occurrence index
//! (assigned in declaration order by the traversal layer).

use serde::{Deserialize, Serialize};

use super::location::CharRange;

/// Identifier of a top-level document object
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjId(pub u32);

/// Identifier of a property within a document object
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropTag(pub u32);

/// A styled span within a rich-text value
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StyleRun {
    /// Style name (e.g., "Emphasis", "VernacularWs")
    pub style: String,

    /// Char range the style covers (end exclusive)
    pub range: CharRange,
}

impl StyleRun {
    pub fn new(style: impl Into<String>, begin: usize, end: usize) -> Self {
        Self {
            style: style.into(),
            range: CharRange::new(begin, end),
        }
    }
}

/// A rich-text property value: plain text plus its style runs
///
/// All offsets are char counts, not byte offsets.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct RichText {
    /// The text content
    pub text: String,

    /// Styled spans over the text; unstyled gaps are permitted
    pub runs: Vec<StyleRun>,
}

impl RichText {
    /// Create a value with no style runs
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// Create a value with explicit style runs
    pub fn styled(text: impl Into<String>, runs: Vec<StyleRun>) -> Self {
        Self {
            text: text.into(),
            runs,
        }
    }

    /// Length in chars (not bytes)
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Style name covering a char offset, if any
    pub fn style_at(&self, offset: usize) -> Option<&str> {
        self.runs
            .iter()
            .find(|r| r.range.contains(offset))
            .map(|r| r.style.as_str())
    }
}

/// Value side of a property
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum PropValue {
    /// A text-bearing property
    Text(RichText),

    /// Owned child objects
    Children(Vec<DocObject>),
}

/// One property of a document object
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Property {
    pub tag: PropTag,
    pub value: PropValue,
}

impl Property {
    pub fn text(tag: PropTag, value: RichText) -> Self {
        Self {
            tag,
            value: PropValue::Text(value),
        }
    }

    pub fn children(tag: PropTag, children: Vec<DocObject>) -> Self {
        Self {
            tag,
            value: PropValue::Children(children),
        }
    }
}

/// A document object: identifier plus ordered properties
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DocObject {
    pub id: ObjId,
    pub props: Vec<Property>,
}

impl DocObject {
    pub fn new(id: ObjId) -> Self {
        Self {
            id,
            props: Vec::new(),
        }
    }

    /// Append a text property (builder style)
    pub fn with_text(mut self, tag: PropTag, value: RichText) -> Self {
        self.props.push(Property::text(tag, value));
        self
    }

    /// Append a child-object property (builder style)
    pub fn with_children(mut self, tag: PropTag, children: Vec<DocObject>) -> Self {
        self.props.push(Property::children(tag, children));
        self
    }
}

/// A document: ordered top-level objects
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Document {
    pub roots: Vec<DocObject>,
}

impl Document {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    pub fn with_roots(roots: Vec<DocObject>) -> Self {
        Self { roots }
    }
}
