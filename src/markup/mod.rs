//! Docstring markup pipeline.
//!
//! - `renderer`: docstring text → HTML fragment with `section` containers per heading
//! - `html`: minimal HTML element tree (parse, compact and pretty serialization)
//! - `sections`: HTML fragment → map of named sections plus a synthesized `description`

pub mod html;
pub mod renderer;
pub mod sections;

pub use renderer::{Diagnostic, DocRenderer, MarkupRenderer, Rendered, Severity};
pub use sections::{describe, DocSections, DESCRIPTION};
