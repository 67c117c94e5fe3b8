//! Utilities for handling .transcribeignore file patterns
//!
//! Patterns are matched against paths relative to the input root, in `/` form.
//!
use anyhow::Result;
use glob::Pattern;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the ignore file looked up in the input root
pub const IGNORE_FILE: &str = ".transcribeignore";

/// Load custom ignore patterns from .transcribeignore file in the input root
///
/// Returns a vector of patterns to ignore. Empty lines and comments (lines starting with #) are skipped.
///
/// # Examples
///
/// ```text
/// # .transcribeignore file content
/// tests/
/// *_pb2.py
/// conftest
/// ```
pub fn load_transcribeignore(root: &Path) -> Result<Vec<String>> {
    let ignore_file = root.join(IGNORE_FILE);

    if !ignore_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&ignore_file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", IGNORE_FILE, e))?;

    let patterns: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if !patterns.is_empty() {
        debug!(
            "📋 Loaded {} custom ignore patterns from {}",
            patterns.len(),
            IGNORE_FILE
        );
    }

    Ok(patterns)
}

/// Check if a relative path matches any of the ignore patterns
///
/// Supports three pattern types:
/// - Directory patterns (ending with /): match a whole path component, plus all contents
/// - Glob patterns (containing `*`, `?` or `[`): match the file name or the whole relative path
/// - Substring patterns: match anywhere in the relative path
///
/// "tests/" matches "tests" and "pkg/tests/x.py" but NOT "my-tests" or "subtests".
pub fn is_ignored_by_pattern(relative: &str, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    // Normalize to Unix-style for consistent pattern matching
    let path_str = relative.replace('\\', "/");
    let file_name = path_str.rsplit('/').next().unwrap_or(&path_str);

    for pattern in patterns {
        // Directory pattern (ends with /)
        if let Some(dir_name) = pattern.strip_suffix('/') {
            if path_str.split('/').any(|component| component == dir_name) {
                return true;
            }
        }
        // Glob pattern (e.g., *_pb2.py, tests/fixture_?.py)
        else if pattern.contains(['*', '?', '[']) {
            match Pattern::new(pattern) {
                Ok(glob) => {
                    if glob.matches(file_name) || glob.matches(&path_str) {
                        return true;
                    }
                }
                Err(e) => warn!("Ignoring invalid pattern '{}': {}", pattern, e),
            }
        }
        // Substring match (matches anywhere in path)
        else if path_str.contains(pattern.as_str()) {
            return true;
        }
    }

    false
}
