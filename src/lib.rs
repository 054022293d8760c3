//! Bounded forward/reverse text search over hierarchical rich-text documents
//!
//! A document is a tree of objects whose properties hold rich-text values or
//! child objects. A search walks the text-bearing runs of that tree in
//! forward or reverse order from a resume point, applies a pattern matcher
//! to each run, and stops at the first match or when a limit location is
//! passed. Wrap-around past the document boundary is supported and bounded:
//! the limit policy guarantees termination.
//!
//! The matcher is a capability ([`Pattern`]) supplied by the caller; literal
//! and regex matchers ship with the crate.

pub mod models;
pub mod search;
pub mod text;

// Re-export commonly used types
pub use models::document::{DocObject, Document, ObjId, PropTag, PropValue, Property, RichText, StyleRun};
pub use models::location::{CharRange, Location, PathStep};
pub use search::cursor::{Direction, FindCursor, RunAddress, Step};
pub use search::walker::{find_in_document, FindOutcome};
pub use text::pattern::{LiteralPattern, MatchRange, Pattern, PatternError, RegexPattern};
pub use text::source::RunSource;
