//! Splits a rendered docstring into named sections.

use std::collections::BTreeMap;

use super::html::{parse_fragment, HtmlError, HtmlNode};

/// Section id → HTML fragment. Ordered so serialized output is stable.
pub type DocSections = BTreeMap<String, String>;

/// Key of the synthesized summary section.
pub const DESCRIPTION: &str = "description";

/// Partition a rendered fragment into named sections.
///
/// The result always holds `description`, built from the first two top-level paragraphs;
/// missing paragraphs contribute empty content. Every `div.section` with an id (at any depth)
/// adds a pretty-printed entry under that id.
pub fn describe(html: &str) -> Result<DocSections, HtmlError> {
    let root = parse_fragment(html)?;

    let mut paragraphs = root
        .children
        .iter()
        .filter(|node| node.tag == "p")
        .map(HtmlNode::to_html);
    let first = paragraphs.next().unwrap_or_default();
    let second = paragraphs.next().unwrap_or_default();

    let mut sections = DocSections::new();
    sections.insert(
        DESCRIPTION.to_string(),
        format!(
            r#"<div class="section" id="description"><div class="synopse">{}</div>,{}</div>"#,
            first, second
        ),
    );

    for node in root.descendants() {
        if node.tag != "div" || !node.has_class("section") {
            continue;
        }
        if let Some(id) = node.attr("id") {
            sections.insert(id.to_string(), node.prettify());
        }
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupRenderer;
    use pretty_assertions::assert_eq;

    fn sections_of(doc: &str) -> DocSections {
        describe(&MarkupRenderer::new().render(doc).html).unwrap()
    }

    #[test]
    fn test_description_joins_first_two_paragraphs() {
        let sections = sections_of("Summary line.\n\nSecond paragraph.\n\nThird.");
        assert_eq!(
            sections[DESCRIPTION],
            "<div class=\"section\" id=\"description\"><div class=\"synopse\"><p>Summary line.</p></div>,<p>Second paragraph.</p></div>"
        );
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_single_paragraph_pads_description() {
        let sections = sections_of("Only one.");
        assert_eq!(
            sections[DESCRIPTION],
            "<div class=\"section\" id=\"description\"><div class=\"synopse\"><p>Only one.</p></div>,</div>"
        );
    }

    #[test]
    fn test_empty_docstring_still_has_description() {
        let sections = sections_of("");
        assert_eq!(
            sections[DESCRIPTION],
            "<div class=\"section\" id=\"description\"><div class=\"synopse\"></div>,</div>"
        );
    }

    #[test]
    fn test_named_sections_are_pretty_printed() {
        let doc = "Summary.\n\nParameters\n----------\nx : int\n    The value.\n\nReturns\n-------\nNothing.";
        let sections = sections_of(doc);

        let keys: Vec<&str> = sections.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["description", "parameters", "returns"]);
        assert_eq!(
            sections["returns"],
            "<div class=\"section\" id=\"returns\">\n <h2>\n  Returns\n </h2>\n <p>\n  Nothing.\n </p>\n</div>\n"
        );
        // Paragraphs inside sections are not top-level
        assert!(sections[DESCRIPTION].ends_with("<p>Summary.</p></div>,</div>"));
    }

    #[test]
    fn test_nested_sections_are_listed_too() {
        let sections = sections_of("# Guide\n\n## Setup\n\nSteps.\n");
        assert!(sections.contains_key("guide"));
        assert!(sections.contains_key("setup"));
        assert!(sections["guide"].contains("id=\"setup\""));
    }

    #[test]
    fn test_description_section_overrides_synthesized_one() {
        let sections = sections_of("Intro.\n\nDescription\n===========\n\nLong form.");
        assert!(sections[DESCRIPTION].contains("Long form."));
        assert!(!sections[DESCRIPTION].contains("synopse"));
    }

    #[test]
    fn test_invalid_markup_is_an_error() {
        assert!(describe("<p>unterminated").is_err());
    }
}
