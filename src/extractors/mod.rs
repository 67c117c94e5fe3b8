//! Source loaders
//!
//! Tree-sitter based extraction that turns a source file into an owned, introspectable object
//! tree. The documentation core only sees the `Introspectable` capability trait.
//!
//! # Architecture
//!
//! - `base` - introspectable object model and the shared `BaseExtractor`
//! - `manager` - `CodeLoader` trait and the `ExtractorManager` that parses files
//! - `python` - Python module/class/function reflection

pub mod base;
pub mod manager;
pub mod python;

// Re-export the public API
pub use base::{DunderAttribute, Introspectable, ObjectKind, SourceObject};
pub use manager::{CodeLoader, ExtractorManager};
