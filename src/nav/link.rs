/// An element a click can land on.
pub trait LinkTarget {
    /// The raw `href` attribute, if the element has one.
    fn href(&self) -> Option<String>;

    fn parent(&self) -> Option<&dyn LinkTarget>;
}

/// `href` of the nearest element, starting at `target`, that has one.
pub fn find_href(target: &dyn LinkTarget) -> Option<String> {
    let mut current = Some(target);
    while let Some(element) = current {
        if let Some(href) = element.href() {
            return Some(href);
        }
        current = element.parent();
    }
    None
}

/// Root-relative links are in-site; protocol-relative (`//host`) are not.
pub fn is_in_site(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}
