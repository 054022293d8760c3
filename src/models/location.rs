//! Positions within the document tree
//!
//! A `Location` pins down one char range inside one text-bearing property:
//! the owning top-level object, the descent path from that object to the
//! property's parent, the property tag with its occurrence index, and the
//! char offsets of the range. Two locations are comparable only when they
//! address the same run (same root, path, tag, and occurrence).

use serde::{Deserialize, Serialize};

use super::document::{ObjId, PropTag};

/// A char range (end exclusive)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharRange {
    pub begin: usize,
    pub end: usize,
}

impl CharRange {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Collapsed range at a single offset
    pub fn at(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }

    /// Check if an offset is contained within this range
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.begin && offset < self.end
    }
}

/// One descent step: child-bearing property tag plus child index under that tag
///
/// The index counts children of the tag across the whole parent object, so a
/// tag that appears twice with two children each yields indices 0..4.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub tag: PropTag,
    pub index: usize,
}

impl PathStep {
    pub fn new(tag: PropTag, index: usize) -> Self {
        Self { tag, index }
    }
}

/// A position within the document tree
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Location {
    /// Owning top-level object
    pub root: ObjId,

    /// Descent path from the root to the property's parent object
    pub path: Vec<PathStep>,

    /// Tag of the text-bearing property
    pub tag: PropTag,

    /// Occurrence index of the tag within the parent object
    pub occurrence: usize,

    /// Char offsets within the property's text
    pub range: CharRange,
}

impl Location {
    pub fn new(
        root: ObjId,
        path: Vec<PathStep>,
        tag: PropTag,
        occurrence: usize,
        range: CharRange,
    ) -> Self {
        Self {
            root,
            path,
            tag,
            occurrence,
            range,
        }
    }

    /// Location in a root-level text property (empty path)
    pub fn in_root(root: ObjId, tag: PropTag, occurrence: usize, range: CharRange) -> Self {
        Self::new(root, Vec::new(), tag, occurrence, range)
    }

    /// Check whether two locations address the same run
    ///
    /// Offsets are ignored; only root, path, tag, and occurrence take part.
    pub fn same_run(&self, other: &Location) -> bool {
        self.root == other.root
            && self.tag == other.tag
            && self.occurrence == other.occurrence
            && self.path == other.path
    }

    /// Document-order comparison of two same-run locations by begin offset
    ///
    /// Meaningless across different runs; callers must check `same_run` first.
    pub fn precedes(&self, other: &Location) -> bool {
        debug_assert!(self.same_run(other), "locations in different runs are not comparable");
        self.range.begin < other.range.begin
    }
}
