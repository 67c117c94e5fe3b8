/// Helper utilities for Python symbol extraction
/// Includes string literal decoding and docstring cleaning
use super::PythonExtractor;
use tree_sitter::Node;

/// Split a string literal into its (lowercased) prefix and the quoted remainder
fn split_string_prefix(literal: &str) -> (String, &str) {
    let quote_start = literal
        .find(|c: char| c == '"' || c == '\'')
        .unwrap_or(literal.len());
    (literal[..quote_start].to_lowercase(), &literal[quote_start..])
}

/// Helper to strip string delimiters (quotes) from Python strings
/// Handles triple quotes (""" or '''), double quotes ("), and single quotes (')
pub fn strip_string_delimiters(s: &str) -> String {
    // Try delimiters in order: triple quotes first (3 chars), then single quotes (1 char)
    let delimiters = [("\"\"\"", 3), ("'''", 3), ("\"", 1), ("'", 1)];

    for (delimiter, strip_count) in &delimiters {
        if s.starts_with(delimiter) && s.ends_with(delimiter) && s.len() >= strip_count * 2 {
            return s[*strip_count..s.len() - strip_count].to_string();
        }
    }

    // No matching delimiter found, return as-is
    s.to_string()
}

/// Decode backslash escapes of a non-raw string body
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            // Line continuation
            Some('\n') => {}
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Decode a `string` node's literal text into its runtime value
///
/// Returns `None` for bytes and f-string literals, which never act as docstrings.
pub fn decode_string_literal(literal: &str) -> Option<String> {
    let (prefix, quoted) = split_string_prefix(literal);
    if prefix.contains('b') || prefix.contains('f') {
        return None;
    }

    let body = strip_string_delimiters(quoted);
    if prefix.contains('r') {
        Some(body)
    } else {
        Some(unescape(&body))
    }
}

/// Decode a `string` or `concatenated_string` node
pub fn decode_string_node(extractor: &PythonExtractor, node: &Node) -> Option<String> {
    let base = extractor.base();
    match node.kind() {
        "string" => decode_string_literal(&base.get_node_text(node)),
        "concatenated_string" => {
            let mut decoded = String::new();
            let mut cursor = node.walk();
            for part in node.named_children(&mut cursor) {
                if part.kind() == "string" {
                    decoded.push_str(&decode_string_literal(&base.get_node_text(&part))?);
                }
            }
            Some(decoded)
        }
        _ => None,
    }
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let spaces = 8 - column % 8;
            out.push_str(&" ".repeat(spaces));
            column += spaces;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

/// Clean up indentation of a docstring the way `inspect.cleandoc` does
///
/// The first line loses its leading whitespace, the remaining lines lose their common
/// indentation, and blank lines are dropped from both ends.
pub fn clean_docstring(doc: &str) -> String {
    let mut lines: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| line.len() - line.trim_start_matches(' ').len())
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            let cut = margin.min(line.len() - line.trim_start_matches(' ').len());
            *line = line[cut..].to_string();
        }
    }

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let leading_blank = lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();

    lines[leading_blank..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_prefixed_literals() {
        assert_eq!(decode_string_literal(r#""plain""#), Some("plain".to_string()));
        assert_eq!(
            decode_string_literal(r#"r"""raw \n kept""""#),
            Some(r"raw \n kept".to_string())
        );
        assert_eq!(
            decode_string_literal(r#"U'tab\there'"#),
            Some("tab\there".to_string())
        );
        assert_eq!(decode_string_literal(r#"b"bytes""#), None);
        assert_eq!(decode_string_literal(r#"f"{x}""#), None);
    }

    #[test]
    fn test_unescape_keeps_unknown_escapes() {
        assert_eq!(unescape(r#"a\\b \d \"q\""#), "a\\b \\d \"q\"");
        assert_eq!(unescape("line\\\ncontinued"), "linecontinued");
    }

    #[test]
    fn test_clean_docstring_removes_common_margin() {
        let doc = "  Summary line.\n\n        Details\n          nested\n        ";
        assert_eq!(clean_docstring(doc), "Summary line.\n\nDetails\n  nested");
    }

    #[test]
    fn test_clean_docstring_strips_blank_edges() {
        assert_eq!(clean_docstring("\n\n    Body.\n\n"), "Body.");
        assert_eq!(clean_docstring(""), "");
        assert_eq!(clean_docstring("   \n  "), "");
    }

    #[test]
    fn test_clean_docstring_expands_tabs() {
        assert_eq!(clean_docstring("Head\n\tbody\n\t  more"), "Head\nbody\n  more");
    }
}
