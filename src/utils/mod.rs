// Transcribe Utilities Module
//
// Common utilities and helper functions used throughout the Transcribe codebase.

use anyhow::Result;
use std::path::Path;

/// File utilities
pub mod file_utils {
    use super::*;
    use std::fs;

    /// Check if a file is a documentable Python source file
    pub fn is_supported_file(path: &Path) -> bool {
        matches!(path.extension().and_then(|e| e.to_str()), Some("py"))
    }

    /// Read file content safely
    pub fn read_file_content(path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    /// Directories that never contain documentable sources
    pub fn is_skipped_directory(path: &Path) -> bool {
        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name == "__pycache__" || name.starts_with('.'),
            None => false,
        }
    }
}

/// Path conversion utilities (native path ↔ href)
pub mod paths;

/// File ignore pattern utilities (.transcribeignore support)
pub mod ignore;
