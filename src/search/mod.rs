//! Bounded document search
//!
//! The cursor examines one run at a time and owns the limit policy; the
//! walker flattens the document, maintains run addresses, and drives the
//! cursor with wrap-around handling.
//!
//! ## Modules
//!
//! - `cursor`: per-invocation search state and the limit predicate
//! - `walker`: document flattening and the traversal loop

pub mod cursor;
pub mod walker;

// Re-exports for convenience
pub use cursor::{Direction, FindCursor, RunAddress, Step};
pub use walker::{collect_runs, find_in_document, FindOutcome, FlatRun};
