//! Metadata extraction for documentable symbols.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::doctree::node::Metadata;
use crate::error::{Result, ScribeError};
use crate::extractors::{DunderAttribute, Introspectable};
use crate::markup::{describe, DocRenderer, DocSections, MarkupRenderer};

static REVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\$Revision: (.*)\$$").unwrap());

/// Strip a version-control `$Revision: X $` wrapper, keeping the trimmed inner value
pub fn unwrap_revision(version: &str) -> String {
    match REVISION.captures(version) {
        Some(captures) => captures[1].trim().to_string(),
        None => version.to_string(),
    }
}

/// Pulls the flat attribute set out of introspectable objects
#[derive(Clone, Debug, Default)]
pub struct MetadataExtractor<R = MarkupRenderer> {
    renderer: R,
}

impl<R: DocRenderer> MetadataExtractor<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Render doc text and split it into named sections
    pub fn doc_sections(&self, owner: &str, text: &str) -> Result<DocSections> {
        let rendered = self.renderer.render(text);
        describe(&rendered.html).map_err(|e| ScribeError::render(owner, e))
    }

    /// Metadata of one object; only attributes the object actually has are set
    pub fn extract<T: Introspectable + ?Sized>(&self, object: &T) -> Result<Metadata> {
        let owner = object.name().unwrap_or("<anonymous>");

        // Undocumented symbols still get a (blank) description
        let doc = Some(self.doc_sections(owner, object.doc().unwrap_or(""))?);

        let attribute = |which: DunderAttribute| object.attribute(which).map(str::to_string);
        let metadata = Metadata {
            name: object.name().map(str::to_string),
            // Only callables (classes and routines) carry one
            signature: object.signature().map(str::to_string),
            doc,
            version: object
                .attribute(DunderAttribute::Version)
                .map(unwrap_revision),
            date: attribute(DunderAttribute::Date),
            author: attribute(DunderAttribute::Author),
            credits: attribute(DunderAttribute::Credits),
        };

        debug!("Extracted metadata for '{}'", owner);
        Ok(metadata)
    }
}
