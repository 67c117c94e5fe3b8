//! Minimal HTML element tree for rendered docstrings.
//!
//! The renderer only emits well-formed XHTML-compatible markup, so the fragment is parsed
//! with `quick-xml` under a synthetic root element.

use std::fmt::Write;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "col", "wbr"];

/// Error while parsing a rendered fragment.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HtmlError {
    /// XML parsing error.
    #[error("HTML parse error: {0}")]
    Parse(#[from] quick_xml::Error),

    /// Encoding error during parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Input ended inside an open element.
    #[error("unexpected end of input inside <{0}>")]
    Unclosed(String),
}

/// An element with text, tail text (text after the element) and children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlNode {
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub tail: String,
    pub children: Vec<HtmlNode>,
}

impl HtmlNode {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the whitespace-separated `class` attribute contains `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// All elements below this one in document order.
    pub fn descendants(&self) -> Vec<&HtmlNode> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag.as_str())
    }

    fn open_tag(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (key, value) in &self.attrs {
            write!(out, r#" {}="{}""#, key, escape_attr(value)).unwrap();
        }
        out.push_str(if self.is_void() { "/>" } else { ">" });
        out
    }

    /// Compact outer HTML, without the tail text.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    fn write_compact(&self, out: &mut String) {
        out.push_str(&self.open_tag());
        if self.is_void() {
            return;
        }
        out.push_str(&escape_text(&self.text));
        for child in &self.children {
            child.write_compact(out);
            out.push_str(&escape_text(&child.tail));
        }
        write!(out, "</{}>", self.tag).unwrap();
    }

    /// Pretty-printed outer HTML: one tag or text run per line, one space per nesting level.
    ///
    /// Whitespace inside `<pre>` is significant, so preformatted blocks stay compact.
    pub fn prettify(&self) -> String {
        let mut out = String::new();
        self.write_pretty(0, &mut out);
        out
    }

    fn write_pretty(&self, depth: usize, out: &mut String) {
        let indent = " ".repeat(depth);
        if self.is_void() || self.tag == "pre" {
            writeln!(out, "{}{}", indent, self.to_html()).unwrap();
            return;
        }

        writeln!(out, "{}{}", indent, self.open_tag()).unwrap();
        let inner = " ".repeat(depth + 1);
        push_pretty_text(&self.text, &inner, out);
        for child in &self.children {
            child.write_pretty(depth + 1, out);
            push_pretty_text(&child.tail, &inner, out);
        }
        writeln!(out, "{}</{}>", indent, self.tag).unwrap();
    }
}

fn collect_descendants<'a>(node: &'a HtmlNode, out: &mut Vec<&'a HtmlNode>) {
    for child in &node.children {
        out.push(child);
        collect_descendants(child, out);
    }
}

fn push_pretty_text(text: &str, indent: &str, out: &mut String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        writeln!(out, "{}{}", indent, escape_text(trimmed)).unwrap();
    }
}

/// Parse an HTML fragment; the returned node is a synthetic `root` holding the top-level elements.
pub fn parse_fragment(html: &str) -> Result<HtmlNode, HtmlError> {
    let wrapped = format!("<root>{}</root>", html);
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    // Open elements; the first Start event is the synthetic root
    let mut stack: Vec<HtmlNode> = Vec::new();
    let mut finished: Option<HtmlNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let mut node = HtmlNode::new(decode_tag(&reader, &e));
                node.attrs = decode_attrs(&reader, &e);
                stack.push(node);
            }
            Event::Empty(e) => {
                let mut node = HtmlNode::new(decode_tag(&reader, &e));
                node.attrs = decode_attrs(&reader, &e);
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?.into_owned();
                if let Some(node) = stack.last_mut() {
                    append_text(node, &text);
                }
            }
            Event::GeneralRef(e) => {
                // Handle entity references (e.g., &lt; &gt; &amp;)
                let entity = reader.decoder().decode(&e)?.into_owned();
                if let Some(node) = stack.last_mut() {
                    append_text(node, &decode_entity(&entity));
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                if let Some(node) = stack.last_mut() {
                    append_text(node, &text);
                }
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => finished = Some(node),
                    }
                }
            }
            Event::Eof => break,
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    match (finished, stack.pop()) {
        (Some(root), None) => Ok(root),
        (_, Some(open)) => Err(HtmlError::Unclosed(open.tag)),
        (None, None) => Err(HtmlError::Unclosed("root".to_string())),
    }
}

fn decode_tag(reader: &Reader<&[u8]>, e: &BytesStart) -> String {
    let name = e.name();
    reader.decoder().decode(name.as_ref()).map_or_else(
        |_| String::from_utf8_lossy(name.as_ref()).into_owned(),
        std::borrow::Cow::into_owned,
    )
}

fn decode_attrs(reader: &Reader<&[u8]>, e: &BytesStart) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
            |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            std::borrow::Cow::into_owned,
        );
        let value = attr.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attr.value).into_owned(),
            std::borrow::Cow::into_owned,
        );
        attrs.push((key, value));
    }
    attrs
}

/// Append text to node's text or last child's tail.
fn append_text(node: &mut HtmlNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "apos" => "'".to_string(),
        "quot" => "\"".to_string(),
        "nbsp" => "\u{a0}".to_string(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}

fn escape_text(text: &str) -> String {
    escape(text, false)
}

fn escape_attr(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    result
}
