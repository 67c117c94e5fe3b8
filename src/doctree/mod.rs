//! Documentation tree
//!
//! - `node` - `DocNode` / `Metadata`, the serialized output shape
//! - `classifier` - decides whether an object is a module, a class or a routine
//! - `metadata` - pulls name, signature, doc sections and dunder attributes off an object
//! - `builder` - `Scribe`, the recursive folder walk that assembles the tree

pub mod builder;
pub mod classifier;
pub mod metadata;
pub mod node;

pub use crate::markup::DocSections;
pub use builder::{to_json, Scribe};
pub use classifier::{classify, SymbolClass};
pub use metadata::{unwrap_revision, MetadataExtractor};
pub use node::{DocNode, Metadata, NodeType};
