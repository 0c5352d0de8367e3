//! Table-of-contents extraction and anchor ids.
//!
//! Heading anchors are derived from heading text with [`slugify`]. The
//! renderer uses the same function for the `id` attribute on heading
//! elements, so every TOC link resolves to the element it names.
//!
//! Two headings with identical text in one article get the same anchor id.
//! The second is unreachable by anchor; nothing here deduplicates.
//!
//! ## Scroll Spy
//!
//! Which section is "active" while reading is a pure function of the
//! headings' vertical offsets and the current scroll position. The page
//! script observes the document and feeds this computation; see
//! [`active_section`].

use crate::types::{Article, BlockKind, TocEntry};

/// Default distance from the top of the viewport at which a heading counts
/// as reached.
pub const DEFAULT_TOP_MARGIN: f64 = 80.0;

/// Derive a URL fragment from heading text.
///
/// Lowercases, replaces every run of characters outside `[a-z0-9]` with a
/// single `-`, and trims leading/trailing `-`.
///
/// - `"1.1 What is a Bootloader?"` → `"1-1-what-is-a-bootloader"`
/// - `"  React & Hooks  "` → `"react-hooks"`
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut slug = String::with_capacity(lower.len());
    let mut pending_sep = false;
    for c in lower.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }
    slug
}

/// Outline of an article's headings, in document order.
pub fn extract_toc(article: &Article) -> Vec<TocEntry> {
    article
        .content
        .iter()
        .filter_map(|block| match &block.kind {
            BlockKind::Heading { level, text } => Some(TocEntry {
                id: slugify(text),
                title: text.clone(),
                level: *level,
            }),
            _ => None,
        })
        .collect()
}

/// Presentation indent step for a TOC entry: top-level sections sit flush.
pub fn indent_level(level: u8) -> u8 {
    match level {
        0..=2 => 0,
        3 => 1,
        _ => 2,
    }
}

/// Pick the heading the reader is currently in.
///
/// `offsets` pairs each TOC entry id with the heading's top offset in the
/// document, in document order. The active section is the last heading whose
/// top has scrolled to within `top_margin` of the viewport top. Returns
/// `None` before the first heading is reached.
pub fn active_section<'a>(
    offsets: &'a [(String, f64)],
    scroll_offset: f64,
    top_margin: f64,
) -> Option<&'a str> {
    let line = scroll_offset + top_margin;
    offsets
        .iter()
        .take_while(|(_, top)| *top <= line)
        .last()
        .map(|(id, _)| id.as_str())
}
