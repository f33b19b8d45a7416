//! Page-specific meta overrides.
//!
//! A page overrides (or adds) a head meta with a quote block:
//!
//! ```text
//! > :MetaOverride property=og:image
//! > /img/cover.png
//! ```
//!
//! The block is cut from the markdown before rendering and the collected
//! overrides are merged into the document head by [`apply_overrides`].
//! Directives inside fenced or indented code are ordinary text.

use super::{CompiledDocument, Meta, TransformError};
use crate::utils::html::parse_attributes;

const DIRECTIVE: &str = ":MetaOverride";

/// Split override blocks out of `markdown`.
///
/// Returns the remaining markdown and the overrides in page order.
pub fn extract_overrides(markdown: &str) -> Result<(String, Vec<Meta>), TransformError> {
    let mut kept = String::with_capacity(markdown.len());
    let mut overrides = Vec::new();
    let mut lines = markdown.lines().enumerate().peekable();
    let mut fence: Option<Fence> = None;

    while let Some((idx, line)) = lines.next() {
        if let Some(open) = fence {
            if open.closed_by(line) {
                fence = None;
            }
            kept.push_str(line);
            kept.push('\n');
            continue;
        }
        fence = Fence::open(line);

        let Some(header) = quoted(line).and_then(|q| q.strip_prefix(DIRECTIVE)) else {
            kept.push_str(line);
            kept.push('\n');
            continue;
        };

        let line_no = idx + 1;
        let (attr, key) = parse_target(header).ok_or(TransformError::MetaOverride {
            line: line_no,
            reason: "expected `attr=key`",
        })?;

        let mut content = Vec::new();
        while let Some((_, value)) = lines.next_if(|(_, l)| quoted(l).is_some()) {
            if let Some(value) = quoted(value).map(str::trim).filter(|v| !v.is_empty()) {
                content.push(value);
            }
        }
        if content.is_empty() {
            return Err(TransformError::MetaOverride {
                line: line_no,
                reason: "missing content line",
            });
        }

        overrides.push(Meta::new(attr, key, content.join(" ")));
    }

    Ok((kept, overrides))
}

/// Text after a leading `>` marker, if the line is quoted.
fn quoted(line: &str) -> Option<&str> {
    block_start(line)?.strip_prefix('>').map(str::trim_start)
}

/// Line with up to three spaces of indentation removed; `None` when the
/// line is indented code.
fn block_start(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    (indent < 4 && !line[indent..].starts_with('\t')).then(|| &line[indent..])
}

/// An open ```` ``` ```` or `~~~` code fence.
#[derive(Debug, Clone, Copy)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let text = block_start(line)?;
        let marker = text.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = text.chars().take_while(|&c| c == marker).count();
        // backticks are not allowed in a backtick fence's info string
        let valid = len >= 3 && !(marker == '`' && text[len..].contains('`'));
        valid.then_some(Self { marker, len })
    }

    fn closed_by(&self, line: &str) -> bool {
        block_start(line).is_some_and(|text| {
            let len = text.chars().take_while(|&c| c == self.marker).count();
            len >= self.len && text[len..].trim().is_empty()
        })
    }
}

fn parse_target(header: &str) -> Option<(String, String)> {
    let mut attrs = parse_attributes(header).into_iter();
    let (attr, key) = attrs.next()?;
    let valid_attr = !attr.is_empty()
        && attr
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    (valid_attr && !key.is_empty() && attrs.next().is_none()).then_some((attr, key))
}

/// Merge page overrides into the head metas.
///
/// An override replaces the meta with the same attribute and key, or is
/// appended when there is none.
pub fn apply_overrides(doc: &mut CompiledDocument) {
    for meta in std::mem::take(&mut doc.overrides) {
        match doc.metas.iter_mut().find(|m| m.same_target(&meta)) {
            Some(existing) => *existing = meta,
            None => doc.metas.push(meta),
        }
    }
}
