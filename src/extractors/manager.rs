//! ExtractorManager - turns a file path into an inspectable module object
//!
//! Handles reading and parsing and delegates reflection to the Python extractor.

use crate::error::{Result, ScribeError};
use crate::extractors::base::{Introspectable, SourceObject};
use crate::extractors::python::PythonExtractor;
use crate::utils::file_utils;
use std::path::Path;
use tracing::debug;
use tree_sitter::Parser;

/// Loads a source file into an introspectable object
///
/// Implementations must be shareable across the worker pool.
pub trait CodeLoader: Sync {
    type Object: Introspectable + Send;

    /// Whether the file is a documentable source artifact
    fn accepts(&self, path: &Path) -> bool;

    /// Load the file at `path` as a module object
    fn load(&self, path: &Path) -> Result<Self::Object>;
}

/// Static Python loader backed by tree-sitter
pub struct ExtractorManager {
    // No state needed - a parser is created per file so the manager can be shared across threads
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Parse Python source text into a module object named `module_name`
    pub fn extract_module(
        &self,
        file_path: &str,
        content: &str,
        module_name: &str,
    ) -> std::result::Result<SourceObject, anyhow::Error> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| anyhow::anyhow!("Failed to set parser language for python: {}", e))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse file: {}", file_path))?;

        let extractor = PythonExtractor::new(content.to_string());

        // Importing a file with a syntax error fails, so does loading it
        let root = tree.root_node();
        let base = extractor.base();
        if base.has_error(&root) {
            let position = base
                .find_first_error(&root)
                .map(|node| node.start_position())
                .unwrap_or_else(|| root.start_position());
            return Err(anyhow::anyhow!(
                "SyntaxError: invalid syntax (line {}, column {})",
                position.row + 1,
                position.column + 1
            ));
        }

        let module = extractor.extract_module(&tree, module_name);

        debug!(
            "Extracted module '{}' with {} members from {}",
            module_name,
            module.members.len(),
            file_path
        );
        Ok(module)
    }
}

impl CodeLoader for ExtractorManager {
    type Object = SourceObject;

    fn accepts(&self, path: &Path) -> bool {
        file_utils::is_supported_file(path)
    }

    fn load(&self, path: &Path) -> Result<SourceObject> {
        let module_name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| ScribeError::load(path, "file name is not valid UTF-8"))?;

        let content =
            file_utils::read_file_content(path).map_err(|e| ScribeError::load(path, e))?;

        self.extract_module(&path.to_string_lossy(), &content, module_name)
            .map_err(|e| ScribeError::load(path, e))
    }
}
