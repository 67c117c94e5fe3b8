// Base extractor types and traits
//
// - types.rs: introspectable object model (SourceObject, ObjectKind, DunderAttribute)
// - extractor.rs: BaseExtractor implementation (core methods)
// - creation_methods.rs: SourceObject construction from tree-sitter nodes
// - tree_methods.rs: Tree navigation and syntax error lookup

pub mod creation_methods;
pub mod extractor;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use creation_methods::ObjectOptions;
pub use extractor::BaseExtractor;
pub use types::{DunderAttribute, Introspectable, ObjectKind, SourceObject};
