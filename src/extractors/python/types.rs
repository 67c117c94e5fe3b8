/// Class extraction and docstring lookup for Python
use super::super::base::{ObjectKind, ObjectOptions, SourceObject};
use super::PythonExtractor;
use super::{assignments, decorators, helpers, signatures};
use tree_sitter::Node;

/// Extract a class definition from a class_definition node
pub(super) fn extract_class(extractor: &PythonExtractor, node: Node) -> SourceObject {
    let base = extractor.base();

    let name = base
        .get_field_text(&node, "name")
        .unwrap_or_else(|| "Anonymous".to_string());

    let doc = extract_docstring(extractor, &node).unwrap_or_default();
    let decorators_list = decorators::extract_decorators(extractor, &node);

    let (attributes, members) = match node.child_by_field_name("body") {
        Some(body) => (
            assignments::extract_dunder_attributes(extractor, &body),
            extractor.extract_members(&body, ObjectKind::Method),
        ),
        None => Default::default(),
    };

    let signature = class_signature(&members);

    base.create_object(
        name,
        ObjectKind::Class,
        ObjectOptions {
            doc: Some(doc),
            signature: Some(signature),
            attributes,
            decorators: decorators_list,
            members,
            ..Default::default()
        },
    )
}

/// Calling a class calls its `__init__` without the receiver; no `__init__` means `()`
fn class_signature(members: &[SourceObject]) -> String {
    let init = members
        .iter()
        .rev()
        .find(|member| member.name == "__init__" && member.kind == ObjectKind::Method);

    let Some(init_signature) = init.and_then(|init| init.signature.as_deref()) else {
        return signatures::format_signature(&[], None);
    };

    // Re-split the rendered "(self, a, b) -> None" into its parameter part
    let inner = init_signature
        .strip_prefix('(')
        .and_then(|rest| rest.rfind(')').map(|close| &rest[..close]))
        .unwrap_or("");
    let params = split_top_level(inner);
    let params = match params.split_first() {
        Some((first, rest)) if signatures::is_receiver(first) => rest.to_vec(),
        _ => params,
    };

    signatures::format_signature(&params, None)
}

/// Split a parameter list on commas that are not nested in brackets or strings
fn split_top_level(params: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut current = String::new();

    for c in params.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    current.push(c);
                }
                '(' | '[' | '{' => {
                    depth += 1;
                    current.push(c);
                }
                ')' | ']' | '}' => {
                    depth -= 1;
                    current.push(c);
                }
                ',' if depth == 0 => {
                    parts.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

/// Extract the docstring of a module, class or function node
///
/// Only a string literal as the very first statement counts.
pub(super) fn extract_docstring(extractor: &PythonExtractor, node: &Node) -> Option<String> {
    let body_node = if node.kind() == "module" {
        *node
    } else {
        node.child_by_field_name("body")?
    };

    let mut cursor = body_node.walk();
    let first_statement = body_node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;

    if first_statement.kind() != "expression_statement" || first_statement.named_child_count() != 1
    {
        return None;
    }

    let expression = first_statement.named_child(0)?;
    let docstring = helpers::decode_string_node(extractor, &expression)?;
    Some(helpers::clean_docstring(&docstring))
}
