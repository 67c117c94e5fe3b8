//! Markdown renderer for docstrings.
//!
//! Headings open `<div class="section" id="...">` containers nested by level, so that
//! numpydoc-style underlined headings (`Parameters\n----------`) become named sections.

use std::collections::HashMap;

use pulldown_cmark::{html, BrokenLink, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Severity of a renderer diagnostic; `Silent` is above every real severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Severe,
    Silent,
}

/// A non-fatal message produced while rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Result of rendering a docstring.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// HTML body fragment. Never contains diagnostics.
    pub html: String,
    /// Diagnostics at or above the report level.
    pub diagnostics: Vec<Diagnostic>,
}

/// Turns doc-comment text into an HTML body fragment.
///
/// Implementations must be shareable across the worker pool.
pub trait DocRenderer: Sync {
    fn render(&self, text: &str) -> Rendered;
}

/// Renders docstring markup to an HTML body fragment.
#[derive(Clone, Debug)]
pub struct MarkupRenderer {
    report_level: Severity,
}

impl Default for MarkupRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupRenderer {
    /// Create a renderer that reports nothing below fatal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            report_level: Severity::Silent,
        }
    }

    /// Keep diagnostics at or above `level`; everything below is dropped silently.
    #[must_use]
    pub fn with_report_level(mut self, level: Severity) -> Self {
        self.report_level = level;
        self
    }

    fn parser_options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
    }

    /// Render docstring text. Empty text renders to an empty fragment.
    pub fn render<'a>(&self, text: &'a str) -> Rendered {
        let mut diagnostics = Vec::new();
        let mut broken_links = Vec::new();

        let events: Vec<Event<'a>> = {
            let callback = |link: BrokenLink<'a>| -> Option<(CowStr<'a>, CowStr<'a>)> {
                broken_links.push(link.reference.to_string());
                None
            };
            Parser::new_with_broken_link_callback(text, Self::parser_options(), Some(callback))
                .collect()
        };

        for reference in broken_links {
            diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                message: format!("unknown link reference \"{}\"", reference),
            });
        }

        let events = wrap_sections(events, &mut diagnostics);

        let mut body = String::with_capacity(text.len() * 2);
        html::push_html(&mut body, events.into_iter());

        let diagnostics: Vec<Diagnostic> = diagnostics
            .into_iter()
            .filter(|diagnostic| diagnostic.severity >= self.report_level)
            .collect();
        for diagnostic in &diagnostics {
            match diagnostic.severity {
                Severity::Info => info!("docstring: {}", diagnostic.message),
                _ => warn!("docstring: {}", diagnostic.message),
            }
        }

        Rendered {
            html: body,
            diagnostics,
        }
    }
}

impl DocRenderer for MarkupRenderer {
    fn render(&self, text: &str) -> Rendered {
        MarkupRenderer::render(self, text)
    }
}

/// Insert section containers around headings and neutralize raw HTML.
///
/// Only top-level headings open sections; a heading inside a blockquote, list item or
/// footnote (such as a doctest `>>> # comment` line) stays a plain heading.
fn wrap_sections<'a>(events: Vec<Event<'a>>, diagnostics: &mut Vec<Diagnostic>) -> Vec<Event<'a>> {
    let mut out = Vec::with_capacity(events.len() + 8);
    let mut open_levels: Vec<u8> = Vec::new();
    let mut ids = SectionIds::default();
    let mut container_depth = 0usize;

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::BlockQuote(_) | Tag::Item | Tag::FootnoteDefinition(_)) => {
                container_depth += 1;
                out.push(event.clone());
            }
            Event::End(TagEnd::BlockQuote(_) | TagEnd::Item | TagEnd::FootnoteDefinition) => {
                container_depth = container_depth.saturating_sub(1);
                out.push(event.clone());
            }
            Event::Start(Tag::Heading { level, .. }) if container_depth == 0 => {
                let level = heading_level_to_num(*level);
                while open_levels.last().is_some_and(|open| *open >= level) {
                    open_levels.pop();
                    out.push(Event::Html(CowStr::Borrowed("</div>\n")));
                }

                let id = ids.assign(&heading_text(&events[index + 1..]));
                out.push(Event::Html(CowStr::from(format!(
                    "<div class=\"section\" id=\"{}\">\n",
                    id
                ))));
                open_levels.push(level);
                out.push(event.clone());
            }
            Event::Html(raw) | Event::InlineHtml(raw) => {
                diagnostics.push(Diagnostic {
                    severity: Severity::Info,
                    message: format!("raw HTML rendered as text: {}", raw.trim()),
                });
                out.push(Event::Text(raw.clone()));
            }
            _ => out.push(event.clone()),
        }
    }

    for _ in open_levels {
        out.push(Event::Html(CowStr::Borrowed("</div>\n")));
    }
    out
}

/// Plain text of the heading whose start event precedes `events`.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Document-unique section ids.
#[derive(Default)]
struct SectionIds {
    seen: HashMap<String, usize>,
}

impl SectionIds {
    fn assign(&mut self, title: &str) -> String {
        let base = slugify(title);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        id
    }
}

/// Lowercase alphanumeric runs joined by `-`; `section` when nothing is left.
pub(crate) fn slugify(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}
