// BaseExtractor implementation
//
// Holds the source text of one file and answers node-text questions for the
// language-specific extractors.

use tree_sitter::Node;

/// Base implementation for language extractors
pub struct BaseExtractor {
    pub content: String,
}

impl BaseExtractor {
    pub fn new(content: String) -> Self {
        Self { content }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Get the text of a named field, if the field exists
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.get_node_text(&field_node))
    }
}
