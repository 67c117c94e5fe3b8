/// Variable assignment extraction
/// Handles module/class metadata attributes, generic aliases, lambdas and plain variables
use super::super::base::{DunderAttribute, ObjectKind, ObjectOptions, SourceObject};
use super::PythonExtractor;
use super::{functions, helpers};
use std::collections::BTreeMap;
use tree_sitter::Node;

/// Resolve `a = b = value` chains to the names bound and the final value node
fn assignment_targets<'a>(extractor: &PythonExtractor, node: Node<'a>) -> (Vec<String>, Option<Node<'a>>) {
    let mut names = Vec::new();
    let mut current = Some(node);
    let mut value = None;

    while let Some(assignment) = current.filter(|n| n.kind() == "assignment") {
        if let Some(left) = assignment.child_by_field_name("left") {
            if left.kind() == "identifier" {
                names.push(extractor.base().get_node_text(&left));
            }
        }
        value = assignment.child_by_field_name("right");
        current = value;
    }

    (names, value)
}

/// Runtime type name of a literal-ish value node
fn value_type_name(extractor: &PythonExtractor, value: &Node) -> String {
    match value.kind() {
        "integer" => "int".to_string(),
        "float" => "float".to_string(),
        "string" | "concatenated_string" => "str".to_string(),
        "true" | "false" => "bool".to_string(),
        "none" => "NoneType".to_string(),
        "list" | "list_comprehension" => "list".to_string(),
        "dictionary" | "dictionary_comprehension" => "dict".to_string(),
        "set" | "set_comprehension" => "set".to_string(),
        "tuple" => "tuple".to_string(),
        "generator_expression" => "generator".to_string(),
        // Best effort: calling a class produces an instance of it
        "call" => extractor
            .base()
            .get_field_text(value, "function")
            .unwrap_or_else(|| "object".to_string()),
        _ => "object".to_string(),
    }
}

/// Extract the names bound by an expression statement
pub(super) fn extract_assignment(extractor: &PythonExtractor, node: Node) -> Vec<SourceObject> {
    let Some(assignment) = node.named_child(0).filter(|n| n.kind() == "assignment") else {
        return vec![];
    };

    let (names, value) = assignment_targets(extractor, assignment);
    // Bare annotations (`x: int`) bind nothing
    let Some(value) = value else {
        return vec![];
    };

    names
        .into_iter()
        .map(|name| match value.kind() {
            "lambda" => functions::extract_lambda(extractor, value, name),
            "subscript" => extractor.base().create_object(
                name,
                ObjectKind::GenericAlias,
                ObjectOptions::default(),
            ),
            _ => extractor.base().create_object(
                name,
                ObjectKind::Variable,
                ObjectOptions {
                    type_name: Some(value_type_name(extractor, &value)),
                    ..Default::default()
                },
            ),
        })
        .collect()
}

/// Collect `__version__`, `__date__`, `__author__` and `__credits__` bound in a block
///
/// Values are string-coerced: string literals are decoded, anything else keeps its source text.
/// A later binding replaces an earlier one.
pub(super) fn extract_dunder_attributes(
    extractor: &PythonExtractor,
    block: &Node,
) -> BTreeMap<DunderAttribute, String> {
    let mut attributes = BTreeMap::new();

    let mut cursor = block.walk();
    for statement in block.named_children(&mut cursor) {
        if statement.kind() != "expression_statement" {
            continue;
        }
        let Some(assignment) = statement
            .named_child(0)
            .filter(|n| n.kind() == "assignment")
        else {
            continue;
        };

        let (names, value) = assignment_targets(extractor, assignment);
        let Some(value) = value else {
            continue;
        };

        for name in names {
            if let Some(attribute) = DunderAttribute::from_attribute_name(&name) {
                let text = helpers::decode_string_node(extractor, &value)
                    .unwrap_or_else(|| extractor.base().get_node_text(&value));
                attributes.insert(attribute, text);
            }
        }
    }

    attributes
}
