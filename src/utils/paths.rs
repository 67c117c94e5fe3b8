// Path and href conversion utilities
//
// Hrefs are platform independent: native directory paths are made relative to the input root
// and always use `/` separators, whatever the platform's separator is.

use anyhow::{Context, Result};
use std::path::{Path, MAIN_SEPARATOR};

/// Convert a path to a relative Unix-style path (with `/` separators)
///
/// This function strips the root prefix and converts all path separators
/// to Unix-style forward slashes (`/`), regardless of the platform.
///
/// # Examples
/// ```text
/// // Linux/macOS
/// to_relative_unix_style("/home/ada/pkg/sub/mod.py", "/home/ada/pkg")
/// // => "sub/mod.py"
/// ```
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).with_context(|| {
        format!(
            "Path '{}' is not within root '{}'",
            path.display(),
            root.display()
        )
    })?;

    // Convert to string and normalize separators to Unix-style
    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    // On Unix, MAIN_SEPARATOR is already '/', so this is a no-op
    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}

/// Href of a folder: its path relative to the input root, rooted at `/`
pub fn folder_href(dir: &Path, root: &Path) -> Result<String> {
    let relative = to_relative_unix_style(dir, root)?;
    let trimmed = relative.trim_matches('/');
    Ok(format!("/{}", trimmed))
}

/// Join a child segment onto a parent href with exactly one `/`
pub fn join_href(parent: &str, segment: &str) -> String {
    if parent.ends_with('/') {
        format!("{}{}", parent, segment)
    } else {
        format!("{}/{}", parent, segment)
    }
}

/// Dotted fully-qualified name: package name followed by the href segments
pub fn href_to_dotted(package: &str, href: &str) -> String {
    href.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(package.to_string(), |mut dotted, segment| {
            dotted.push('.');
            dotted.push_str(segment);
            dotted
        })
}
