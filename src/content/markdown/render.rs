//! Markdown to HTML with heading anchors.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Parser, Tag, TagEnd, html};
use rustc_hash::FxHashMap;

use super::MarkdownOptions;
use crate::utils::slug::slugify;

/// Result of rendering one markdown source.
#[derive(Debug, Default)]
pub struct Rendered {
    pub html: String,
    /// Plain text of the first `h1`.
    pub heading: Option<String>,
    /// Whether the source contains fenced or indented code blocks.
    pub has_code: bool,
}

/// Render markdown to HTML.
///
/// Headings without an explicit id get a slug of their text; repeated
/// slugs are suffixed `-1`, `-2`, ... in document order.
pub fn render(markdown: &str, options: &MarkdownOptions) -> Rendered {
    let mut events: Vec<Event> = Parser::new_ext(markdown, options.to_pulldown_options()).collect();
    let mut rendered = Rendered::default();
    let mut seen: FxHashMap<String, usize> = FxHashMap::default();

    let mut i = 0;
    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let level = *level;
                let has_id = id.is_some();
                let text = heading_text(&events[i + 1..]);

                if level == HeadingLevel::H1 && rendered.heading.is_none() {
                    rendered.heading = Some(text.clone());
                }
                if !has_id && let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
                    *id = Some(CowStr::from(unique_slug(&text, &mut seen)));
                }
            }
            Event::Start(Tag::CodeBlock(_)) => rendered.has_code = true,
            _ => {}
        }
        i += 1;
    }

    html::push_html(&mut rendered.html, events.into_iter());
    rendered
}

/// Concatenated text up to the closing heading tag.
fn heading_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

fn unique_slug(text: &str, seen: &mut FxHashMap<String, usize>) -> String {
    let base = match slugify(text) {
        s if s.is_empty() => "section".to_string(),
        s => s,
    };
    let count = seen.entry(base.clone()).or_insert(0);
    let slug = if *count == 0 {
        base
    } else {
        format!("{base}-{count}")
    };
    *count += 1;
    slug
}
