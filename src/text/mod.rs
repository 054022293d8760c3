//! Text access and pattern matching
//!
//! ## Modules
//!
//! - `source`: transient char-addressable view over one rich-text run
//! - `pattern`: the matcher capability plus literal and regex matchers

pub mod pattern;
pub mod source;

// Re-exports for convenience
pub use pattern::{LiteralPattern, MatchRange, Pattern, PatternError, RegexPattern};
pub use source::RunSource;
