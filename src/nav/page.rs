//! Fetched document parsing.

use tl::{HTMLTag, NodeHandle, Parser, ParserOptions};

use crate::utils::html::unescape;

/// The parts of a fetched page a soft navigation needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub title: Option<String>,
    /// Inner HTML of the content container; empty when it is missing.
    pub content: String,
    /// Inline scripts inside the container, in document order.
    pub scripts: Vec<String>,
}

impl FetchedPage {
    /// Parse `html`. Unparseable input yields an empty page.
    pub fn parse(html: &str, container_id: &str) -> Self {
        // tl reads `<` inside script bodies as markup
        let (masked, bodies) = mask_raw_text(html);
        let Ok(dom) = tl::parse(&masked, ParserOptions::default().track_ids()) else {
            return Self::default();
        };
        let parser = dom.parser();

        let title = dom
            .query_selector("title")
            .and_then(|mut titles| titles.next())
            .and_then(|handle| handle.get(parser))
            .map(|node| unescape(&node.inner_text(parser)).trim().to_string());

        let container = dom
            .get_element_by_id(container_id)
            .and_then(|handle| handle.get(parser))
            .and_then(|node| node.as_tag());

        let (content, scripts) = match container {
            Some(tag) => {
                let mut scripts = Vec::new();
                collect_inline_scripts(tag, parser, &bodies, &mut scripts);
                (unmask(&tag.inner_html(parser), &bodies), scripts)
            }
            None => (String::new(), Vec::new()),
        };

        Self {
            title,
            content,
            scripts,
        }
    }
}

fn collect_inline_scripts(
    tag: &HTMLTag,
    parser: &Parser,
    bodies: &[String],
    out: &mut Vec<String>,
) {
    for handle in tag.children().top().iter() {
        let Some(child) = handle_tag(*handle, parser) else {
            continue;
        };
        if child.name().as_utf8_str().eq_ignore_ascii_case("script") {
            if child.attributes().get("src").is_none() {
                let text = child.inner_text(parser);
                let source = body_index(&text)
                    .and_then(|i| bodies.get(i))
                    .map_or(&*text, String::as_str);
                if !source.trim().is_empty() {
                    out.push(source.to_string());
                }
            }
        } else {
            collect_inline_scripts(child, parser, bodies, out);
        }
    }
}

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT: [&str; 2] = ["script", "style"];

const MARK_OPEN: &str = "@folio-raw-";
const MARK_CLOSE: char = '@';

fn marker(index: usize) -> String {
    format!("{MARK_OPEN}{index}{MARK_CLOSE}")
}

fn body_index(text: &str) -> Option<usize> {
    text.strip_prefix(MARK_OPEN)?
        .strip_suffix(MARK_CLOSE)?
        .parse()
        .ok()
}

/// Replace every raw-text element body with a marker.
///
/// Returns the masked document and the bodies, indexed by marker. An
/// element without an end tag is left as is, along with the rest of the
/// document.
fn mask_raw_text(html: &str) -> (String, Vec<String>) {
    // ASCII lowercasing keeps byte offsets
    let lower = html.to_ascii_lowercase();
    let mut masked = String::with_capacity(html.len());
    let mut bodies = Vec::new();
    let mut pos = 0;

    while let Some((name, open)) = next_raw_open(&lower, pos) {
        let Some(body_start) = lower[open..].find('>').map(|i| open + i + 1) else {
            break;
        };
        let Some(body_end) = lower[body_start..]
            .find(&format!("</{name}"))
            .map(|i| body_start + i)
        else {
            break;
        };
        masked.push_str(&html[pos..body_start]);
        masked.push_str(&marker(bodies.len()));
        bodies.push(html[body_start..body_end].to_string());
        pos = body_end;
    }
    masked.push_str(&html[pos..]);
    (masked, bodies)
}

fn next_raw_open(lower: &str, from: usize) -> Option<(&'static str, usize)> {
    RAW_TEXT
        .iter()
        .filter_map(|name| find_open_tag(lower, from, name).map(|at| (*name, at)))
        .min_by_key(|(_, at)| *at)
}

fn find_open_tag(lower: &str, mut from: usize, name: &str) -> Option<usize> {
    let pattern = format!("<{name}");
    while let Some(i) = lower[from..].find(&pattern) {
        let at = from + i;
        let after = lower[at + pattern.len()..].chars().next();
        if after.is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/') {
            return Some(at);
        }
        from = at + pattern.len();
    }
    None
}

fn unmask(html: &str, bodies: &[String]) -> String {
    let mut out = html.to_string();
    for (index, body) in bodies.iter().enumerate() {
        let mark = marker(index);
        if out.contains(&mark) {
            out = out.replace(&mark, body);
        }
    }
    out
}

fn handle_tag<'p, 'b>(handle: NodeHandle, parser: &'p Parser<'b>) -> Option<&'p HTMLTag<'b>> {
    handle.get(parser)?.as_tag()
}
