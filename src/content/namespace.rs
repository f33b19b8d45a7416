//! Namespace rewrite for sites served under a sub-path.
//!
//! Every root-relative `href`/`src` (starting with `/` but not `//`) gains
//! the namespace prefix. Links already under the namespace are left alone.
//! Only whole attribute names count, so `data-src` and `xlink:href` keep
//! their values.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

use super::CompiledDocument;

static RE_LINK_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\s)(href|src)=(["'])(/[^"']*)(["'])"#).unwrap());

/// Prefix a single URL with `prefix` (normalized `/segment` form).
pub fn prefix_url<'a>(url: &'a str, prefix: &str) -> Cow<'a, str> {
    if !url.starts_with('/') || url.starts_with("//") || is_under(url, prefix) {
        return Cow::Borrowed(url);
    }
    Cow::Owned(format!("{prefix}{url}"))
}

fn is_under(url: &str, prefix: &str) -> bool {
    url.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

/// Prefix every root-relative link attribute inside an HTML fragment.
pub fn prefix_links<'a>(html: &'a str, prefix: &str) -> Cow<'a, str> {
    RE_LINK_ATTR.replace_all(html, |caps: &Captures| {
        let url = &caps[4];
        if caps[3] != caps[5] {
            return caps[0].to_string();
        }
        format!(
            "{}{}={}{}{}",
            &caps[1],
            &caps[2],
            &caps[3],
            prefix_url(url, prefix),
            &caps[5]
        )
    })
}

/// Apply the namespace to the ToC, the body and the head asset links.
pub fn apply_namespace(doc: &mut CompiledDocument, prefix: &str) {
    doc.toc_html = prefix_links(&doc.toc_html, prefix).into_owned();
    doc.body_html = prefix_links(&doc.body_html, prefix).into_owned();
    for url in doc.stylesheets.iter_mut().chain(doc.head_scripts.iter_mut()) {
        *url = prefix_url(url, prefix).into_owned();
    }
}
