/// Decorator extraction and handling
/// Supports @property, @staticmethod, @classmethod, and custom decorators
use super::PythonExtractor;
use tree_sitter::Node;

/// Extract decorators from a function or class definition
pub fn extract_decorators(extractor: &PythonExtractor, node: &Node) -> Vec<String> {
    let mut decorators = Vec::new();
    let base = extractor.base();

    // Only the direct parent can decorate this definition
    let decorated_node = if node.kind() == "decorated_definition" {
        Some(*node)
    } else {
        node.parent()
            .filter(|parent| parent.kind() == "decorated_definition")
    };

    if let Some(decorated_node) = decorated_node {
        for child in base.get_children_of_type(&decorated_node, "decorator") {
            let mut decorator_text = base.get_node_text(&child);

            // Remove @ prefix (@ is ASCII, so this is safe)
            if decorator_text.starts_with('@') && decorator_text.is_char_boundary(1) {
                decorator_text = decorator_text[1..].trim().to_string();
            }

            // Extract just the decorator name without parameters
            // e.g., "lru_cache(maxsize=128)" -> "lru_cache"
            if let Some(paren_index) = decorator_text.find('(') {
                decorator_text = decorator_text[..paren_index].to_string();
            }

            decorators.push(decorator_text);
        }
    }

    decorators
}

/// Decorators that turn a class-body `def` into something other than a plain function
/// (`inspect.isfunction` is false for these when looked up on the class)
pub fn is_descriptor_decorator(decorator: &str) -> bool {
    matches!(
        decorator,
        "property" | "classmethod" | "functools.cached_property" | "cached_property"
    ) || decorator.ends_with(".setter")
        || decorator.ends_with(".getter")
        || decorator.ends_with(".deleter")
}
