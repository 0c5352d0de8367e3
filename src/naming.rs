//! Filename convention for article sources.
//!
//! Article files follow an `NNN-slug` pattern: an optional numeric prefix that
//! fixes the article's position in the collection, then the routing slug.
//!
//! - `010-modern-css.json` → position 10, slug `modern-css`
//! - `web-trends.md` → no position (sorts after numbered files), slug `web-trends`
//!
//! Slugs are lowercased so `020-Bootloader.md` and a link to `/bootloader/`
//! agree on case-sensitive file servers.

/// Result of parsing an article file stem like `020-react-performance`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`20` from `020-react-performance`).
    pub number: Option<u32>,
    /// Lowercased part after `NNN-`. Empty if number-only.
    /// For unnumbered stems this is the whole stem.
    pub slug: String,
}

/// Parse a file stem following the `NNN-slug` convention.
///
/// - `"020-react-performance"` → number=Some(20), slug="react-performance"
/// - `"001"` / `"001-"` → number=Some(1), slug=""
/// - `"web-trends"` → number=None, slug="web-trends"
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-') {
        if let Ok(num) = prefix.parse::<u32>() {
            return ParsedName {
                number: Some(num),
                slug: rest.to_lowercase(),
            };
        }
    }
    if let Ok(num) = stem.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            slug: String::new(),
        };
    }
    ParsedName {
        number: None,
        slug: stem.to_lowercase(),
    }
}

/// Whether `slug` can be used as a single URL path segment and output
/// directory name: non-empty, only `a-z`, `0-9` and `-`.
pub fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
