//! Data models for the search engine
//!
//! This module contains the hierarchical rich-text document model and the
//! location types that address positions within it.
//!
//! ## Modules
//!
//! - `document`: objects, properties, and rich-text values
//! - `location`: char ranges, path steps, and tree locations

pub mod document;
pub mod location;

// Re-export commonly used types
pub use document::{DocObject, Document, ObjId, PropTag, PropValue, Property, RichText, StyleRun};
pub use location::{CharRange, Location, PathStep};
