//! Compiled page model.

use crate::config::NavConfig;
use crate::utils::html::{escape, escape_attr};

/// A `<meta>` tag: `<meta {attr}="{key}" content="{content}">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub attr: String,
    pub key: String,
    pub content: String,
}

impl Meta {
    pub fn new(attr: impl Into<String>, key: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            attr: attr.into(),
            key: key.into(),
            content: content.into(),
        }
    }

    /// Two metas target the same tag when attribute and key agree.
    pub fn same_target(&self, other: &Meta) -> bool {
        self.attr == other.attr && self.key == other.key
    }
}

/// A named script the page wants in the site bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub source: String,
}

impl Script {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Output of the content transform, refined by every later stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledDocument {
    pub title: String,
    pub metas: Vec<Meta>,
    /// Page-specific metas, merged into `metas` by the meta override stage.
    pub overrides: Vec<Meta>,
    /// Stylesheet hrefs linked from the head.
    pub stylesheets: Vec<String>,
    /// Deferred script srcs linked from the head.
    pub head_scripts: Vec<String>,
    pub toc_html: String,
    pub body_html: String,
    /// Registrations not yet collected into the bundle.
    pub scripts: Vec<Script>,
}

impl CompiledDocument {
    /// Render the full HTML page.
    pub fn render(&self, nav: &NavConfig) -> String {
        let mut html = String::with_capacity(self.body_html.len() + self.toc_html.len() + 512);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", escape(&self.title)));
        for meta in &self.metas {
            html.push_str(&format!(
                "<meta {}=\"{}\" content=\"{}\">\n",
                meta.attr,
                escape_attr(&meta.key),
                escape_attr(&meta.content)
            ));
        }
        for href in &self.stylesheets {
            html.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                escape_attr(href)
            ));
        }
        for src in &self.head_scripts {
            html.push_str(&format!(
                "<script src=\"{}\" defer></script>\n",
                escape_attr(src)
            ));
        }
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!(
            "<nav id=\"{}\">\n{}</nav>\n",
            escape_attr(&nav.toc),
            self.toc_html
        ));
        html.push_str(&format!(
            "<div id=\"{}\">\n{}</div>\n",
            escape_attr(&nav.container),
            self.body_html
        ));
        html.push_str("</body>\n</html>\n");
        html
    }
}
