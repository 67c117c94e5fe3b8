// Transcribe Core - tree-sitter powered documentation extraction for Python source trees
//
// Pipeline: CodeLoader → SymbolClassifier → MetadataExtractor (MarkupRenderer + SectionSplitter)
// → TreeBuilder → JSON serializer. Everything below `doctree` is language-agnostic and only
// talks to source objects through the `Introspectable` capability trait.

pub mod config;
pub mod doctree;
pub mod error;
pub mod extractors;
pub mod markup;
pub mod utils;

pub use config::ScribeConfig;
pub use doctree::{DocNode, DocSections, Metadata, NodeType, Scribe};
pub use error::{Result, ScribeError};
pub use extractors::{CodeLoader, ExtractorManager, Introspectable, ObjectKind, SourceObject};
pub use markup::{MarkupRenderer, Severity};
