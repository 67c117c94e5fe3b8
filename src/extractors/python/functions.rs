/// Function and method extraction
/// Handles regular functions, async functions, lambdas, and class-body methods
use super::super::base::{ObjectKind, ObjectOptions, SourceObject};
use super::PythonExtractor;
use super::{decorators, signatures, types};
use tree_sitter::Node;

/// Extract a function definition as a function or, inside a class body, a method
pub fn extract_function(extractor: &PythonExtractor, node: Node, kind: ObjectKind) -> SourceObject {
    let base = extractor.base();

    // Extract function name from 'name' field
    let name = base
        .get_field_text(&node, "name")
        .unwrap_or_else(|| "Anonymous".to_string());

    // Extract parameters from 'parameters' field
    let params = node
        .child_by_field_name("parameters")
        .map(|parameters_node| signatures::extract_parameters(extractor, &parameters_node))
        .unwrap_or_default();

    // Extract return type annotation from 'return_type' field
    let return_type = base.get_field_text(&node, "return_type");
    let signature = signatures::format_signature(&params, return_type.as_deref());

    let decorators_list = decorators::extract_decorators(extractor, &node);

    // Properties and classmethods are descriptors, not plain functions on the class
    let descriptor = if kind == ObjectKind::Method {
        decorators_list
            .iter()
            .find(|decorator| decorators::is_descriptor_decorator(decorator))
            .cloned()
    } else {
        None
    };

    let doc = types::extract_docstring(extractor, &node).unwrap_or_default();

    match descriptor {
        Some(descriptor) => base.create_object(
            name,
            ObjectKind::Variable,
            ObjectOptions {
                doc: Some(doc),
                decorators: decorators_list,
                type_name: Some(descriptor),
                ..Default::default()
            },
        ),
        None => base.create_object(
            name,
            kind,
            ObjectOptions {
                doc: Some(doc),
                signature: Some(signature),
                decorators: decorators_list,
                ..Default::default()
            },
        ),
    }
}

/// Extract a lambda bound to a name (`square = lambda x: x * x`)
pub(super) fn extract_lambda(extractor: &PythonExtractor, node: Node, name: String) -> SourceObject {
    let params = node
        .child_by_field_name("parameters")
        .map(|parameters_node| signatures::extract_parameters(extractor, &parameters_node))
        .unwrap_or_default();

    extractor.base().create_object(
        name,
        ObjectKind::Function,
        ObjectOptions {
            // Lambdas never carry a docstring
            doc: Some(String::new()),
            signature: Some(signatures::format_signature(&params, None)),
            ..Default::default()
        },
    )
}
