// SourceObject creation methods

use std::collections::BTreeMap;

use super::extractor::BaseExtractor;
use super::types::{DunderAttribute, ObjectKind, SourceObject};

/// Optional parts of a reflected object
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    pub doc: Option<String>,
    pub signature: Option<String>,
    pub attributes: BTreeMap<DunderAttribute, String>,
    pub decorators: Vec<String>,
    pub members: Vec<SourceObject>,
    /// Overrides the type name derived from the kind
    pub type_name: Option<String>,
}

impl BaseExtractor {
    /// Create a reflected object; the type name defaults to the kind's
    pub fn create_object(
        &self,
        name: String,
        kind: ObjectKind,
        options: ObjectOptions,
    ) -> SourceObject {
        SourceObject {
            kind,
            name,
            type_name: options.type_name.unwrap_or_else(|| kind.to_string()),
            doc: options.doc,
            signature: options.signature,
            attributes: options.attributes,
            decorators: options.decorators,
            members: options.members,
        }
    }
}
