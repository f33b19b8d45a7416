//! Heading anchor slugs.

use deunicode::deunicode;

/// Slugify heading text for use as an element id.
///
/// Unicode is transliterated to ASCII, runs of non-alphanumerics collapse
/// to a single `-`, and the result is lowercase.
///
/// ```ignore
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("Über Café"), "uber-cafe");
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Getting Started!"), "getting-started");
        assert_eq!(slugify("  API -- Reference  "), "api-reference");
    }

    #[test]
    fn test_slugify_unicode() {
        assert_eq!(slugify("Über Café"), "uber-cafe");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify("!!!"), "");
    }
}
