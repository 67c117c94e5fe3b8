/// Python extractor: turns a parsed Python file into an introspectable module object
///
/// This module is organized into focused sub-modules:
/// - helpers: string literal decoding and docstring cleaning
/// - types: class extraction and docstring lookup
/// - functions: function and method extraction
/// - signatures: parameter list rendering
/// - decorators: decorator extraction
/// - assignments: module/class attributes, generic aliases and variables
pub(crate) mod assignments;
pub(crate) mod decorators;
pub(crate) mod functions;
pub(crate) mod helpers;
pub(crate) mod signatures;
pub(crate) mod types;

use crate::extractors::base::{BaseExtractor, ObjectKind, ObjectOptions, SourceObject};
use std::collections::HashMap;
use tree_sitter::{Node, Tree};

/// Python extractor for building a reflected module from Python source code
pub struct PythonExtractor {
    base: BaseExtractor,
}

impl PythonExtractor {
    pub fn new(content: String) -> Self {
        Self {
            base: BaseExtractor::new(content),
        }
    }

    /// Build the module object for a whole file
    pub fn extract_module(&self, tree: &Tree, module_name: &str) -> SourceObject {
        let root = tree.root_node();

        let doc = types::extract_docstring(self, &root).unwrap_or_default();
        let attributes = assignments::extract_dunder_attributes(self, &root);
        let members = self.extract_members(&root, ObjectKind::Function);

        self.base.create_object(
            module_name.to_string(),
            ObjectKind::Module,
            ObjectOptions {
                doc: Some(doc),
                attributes,
                members,
                ..Default::default()
            },
        )
    }

    /// Reflect the names bound by a module or class body, in order of first binding.
    ///
    /// `routine_kind` decides whether `def` statements become functions or methods.
    /// A rebound name (`@overload` stubs, redefinitions, later assignments) keeps only its
    /// last binding, at the position of the first one.
    pub(crate) fn extract_members(&self, block: &Node, routine_kind: ObjectKind) -> Vec<SourceObject> {
        let mut members: Vec<SourceObject> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut bind = |member: SourceObject| match positions.get(&member.name) {
            Some(&index) => members[index] = member,
            None => {
                positions.insert(member.name.clone(), members.len());
                members.push(member);
            }
        };

        let mut cursor = block.walk();
        for child in block.named_children(&mut cursor) {
            let definition = self.base.definition_of(&child);
            match definition.kind() {
                "class_definition" => bind(types::extract_class(self, definition)),
                "function_definition" => {
                    bind(functions::extract_function(self, definition, routine_kind))
                }
                "expression_statement" => {
                    assignments::extract_assignment(self, definition)
                        .into_iter()
                        .for_each(&mut bind)
                }
                _ => {}
            }
        }

        members
    }

    // ========================================================================
    // Accessors for sub-modules
    // ========================================================================

    pub(crate) fn base(&self) -> &BaseExtractor {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{DunderAttribute, Introspectable};
    use tree_sitter::Parser;

    fn extract(code: &str) -> SourceObject {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(code, None).unwrap();
        PythonExtractor::new(code.to_string()).extract_module(&tree, "mod")
    }

    #[test]
    fn test_module_docstring_and_metadata() {
        let code = r#""""Utilities for things.

    Indented continuation.
"""
__version__ = "$Revision: 42 $"
__author__ = 'Ada'
__credits__ = ("Alan", "Grace")
"#;
        let module = extract(code);

        assert_eq!(module.kind(), ObjectKind::Module);
        assert_eq!(module.name(), Some("mod"));
        assert_eq!(
            module.doc(),
            Some("Utilities for things.\n\nIndented continuation.")
        );
        assert_eq!(
            module.attribute(DunderAttribute::Version),
            Some("$Revision: 42 $")
        );
        assert_eq!(module.attribute(DunderAttribute::Author), Some("Ada"));
        assert_eq!(
            module.attribute(DunderAttribute::Credits),
            Some("(\"Alan\", \"Grace\")")
        );
        assert_eq!(module.attribute(DunderAttribute::Date), None);
        assert_eq!(module.signature(), None, "Modules are not callable");
    }

    #[test]
    fn test_module_without_docstring_has_empty_doc() {
        let module = extract("x = 1\n\"\"\"not a docstring\"\"\"\n");
        assert_eq!(module.doc(), Some(""));
    }

    #[test]
    fn test_members_in_declaration_order() {
        let code = r#"
import os

class Thing:
    def go(self):
        pass

def run(a, b=1):
    pass

@decorator
def wrapped():
    pass

Alias = list[int]
LIMIT = 10
"#;
        let module = extract(code);
        let summary: Vec<(&str, ObjectKind)> = module
            .members()
            .iter()
            .map(|m| (m.name.as_str(), m.kind))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Thing", ObjectKind::Class),
                ("run", ObjectKind::Function),
                ("wrapped", ObjectKind::Function),
                ("Alias", ObjectKind::GenericAlias),
                ("LIMIT", ObjectKind::Variable),
            ]
        );
        assert_eq!(module.member("wrapped").unwrap().decorators, vec!["decorator"]);
        assert_eq!(module.member("LIMIT").unwrap().type_name, "int");
    }

    #[test]
    fn test_rebound_names_keep_last_binding_at_first_position() {
        let code = r#"
from typing import overload

@overload
def f(x: int) -> int: ...

@overload
def f(x: str) -> str: ...

def f(x):
    return x

class C:
    def go(self):
        pass

    def go(self, x):
        pass

def helper():
    pass

helper = None
"#;
        let module = extract(code);
        let summary: Vec<(&str, ObjectKind)> = module
            .members()
            .iter()
            .map(|m| (m.name.as_str(), m.kind))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("f", ObjectKind::Function),
                ("C", ObjectKind::Class),
                ("helper", ObjectKind::Variable),
            ]
        );
        let f = module.member("f").unwrap();
        assert_eq!(f.signature.as_deref(), Some("(x)"));
        assert!(f.decorators.is_empty());

        let class = module.member("C").unwrap();
        assert_eq!(class.members.len(), 1);
        assert_eq!(class.members[0].signature.as_deref(), Some("(self, x)"));
    }
}
