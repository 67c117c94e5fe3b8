// Tree navigation methods for BaseExtractor

use super::extractor::BaseExtractor;
use tree_sitter::Node;

impl BaseExtractor {
    /// Check if node has error
    pub fn has_error(&self, node: &Node) -> bool {
        node.has_error() || node.kind() == "ERROR"
    }

    /// Locate the first `ERROR` or missing node, depth first
    pub fn find_first_error<'a>(&self, node: &Node<'a>) -> Option<Node<'a>> {
        if node.is_error() || node.is_missing() {
            return Some(*node);
        }
        if !node.has_error() {
            return None;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(found) = self.find_first_error(&child) {
                return Some(found);
            }
        }
        None
    }

    /// Get children of type
    pub fn get_children_of_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Vec<Node<'a>> {
        let mut children = Vec::new();
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if child.kind() == child_type {
                    children.push(child);
                }
            }
        }
        children
    }

    /// Unwrap a `decorated_definition` to the class/function it decorates
    pub fn definition_of<'a>(&self, node: &Node<'a>) -> Node<'a> {
        if node.kind() == "decorated_definition" {
            if let Some(definition) = node.child_by_field_name("definition") {
                return definition;
            }
        }
        *node
    }
}
