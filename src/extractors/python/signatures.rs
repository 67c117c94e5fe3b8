/// Function signatures and parameter extraction
/// Renders parameter lists the way `inspect.signature` prints them
use super::PythonExtractor;
use tree_sitter::Node;

/// Extract function parameters from a parameters node
pub fn extract_parameters(extractor: &PythonExtractor, parameters_node: &Node) -> Vec<String> {
    let mut params = Vec::new();
    let base = extractor.base();

    let mut cursor = parameters_node.walk();
    for child in parameters_node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                // Simple parameter name, *args or **kwargs
                params.push(base.get_node_text(&child));
            }
            "keyword_separator" => params.push("*".to_string()),
            "positional_separator" => params.push("/".to_string()),
            "default_parameter" => {
                // parameter=default_value
                let name = base.get_field_text(&child, "name").unwrap_or_default();
                let value = base.get_field_text(&child, "value").unwrap_or_default();
                params.push(format!("{}={}", name, value));
            }
            "typed_parameter" => {
                // parameter: type (the name may be a splat pattern)
                let name = child
                    .named_child(0)
                    .map(|name_node| base.get_node_text(&name_node))
                    .unwrap_or_default();
                match base.get_field_text(&child, "type") {
                    Some(type_str) => params.push(format!("{}: {}", name, type_str)),
                    None => params.push(name),
                }
            }
            "typed_default_parameter" => {
                // parameter: type = default_value
                let name = base.get_field_text(&child, "name").unwrap_or_default();
                let type_str = base.get_field_text(&child, "type").unwrap_or_default();
                let value = base.get_field_text(&child, "value").unwrap_or_default();
                params.push(format!("{}: {} = {}", name, type_str, value));
            }
            "comment" => {}
            _ => params.push(base.get_node_text(&child)),
        }
    }

    params
}

/// Render a full signature from a parameter list and an optional return annotation
pub fn format_signature(params: &[String], return_type: Option<&str>) -> String {
    match return_type {
        Some(return_type) => format!("({}) -> {}", params.join(", "), return_type),
        None => format!("({})", params.join(", ")),
    }
}

/// Whether a parameter can be dropped as the bound receiver (`self`/`cls`)
pub fn is_receiver(param: &str) -> bool {
    !param.starts_with('*') && param != "/"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_signature() {
        let params = vec!["a".to_string(), "b=1".to_string()];
        assert_eq!(format_signature(&params, None), "(a, b=1)");
        assert_eq!(format_signature(&params, Some("int")), "(a, b=1) -> int");
        assert_eq!(format_signature(&[], None), "()");
    }

    #[test]
    fn test_is_receiver() {
        assert!(is_receiver("self"));
        assert!(is_receiver("cls: type"));
        assert!(!is_receiver("*args"));
        assert!(!is_receiver("/"));
    }
}
