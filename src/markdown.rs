//! Conversion of markdown-string article bodies into content blocks.
//!
//! Articles written as `.md` files are turned into the same
//! [`ContentBlock`] sequence as block-array articles, once, at load time.
//! Everything downstream (search, TOC, rendering) sees a single shape.
//!
//! This is a lossy single-pass interpretation, not a markdown parser:
//!
//! 1. The body is split on fenced code blocks. The split keeps the two
//!    capture groups of the fence pattern, so partitions come in threes:
//!    `[prose, language, code, prose, language, code, …, prose]`.
//! 2. Prose partitions are read line by line:
//!    `# ` / `## ` / `### ` start headings, `- ` starts a list item
//!    (consecutive items form one list), any other non-blank line is a
//!    paragraph.
//!
//! Nested lists, inline emphasis and links are passed through as text.

use crate::types::{BlockKind, ContentBlock, ListStyle};
use regex::Regex;
use std::sync::LazyLock;

/// Language assumed for fences without an info string.
pub const DEFAULT_LANGUAGE: &str = "javascript";

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```(\w+)?\n([\s\S]*?)\n```").expect("fence pattern must compile")
});

/// Split `content` on fences, keeping both capture groups in place.
///
/// Partition `i` is prose when `i % 3 == 0`, a fence language (possibly
/// absent) when `i % 3 == 1`, and fenced code when `i % 3 == 2`.
fn partition(content: &str) -> Vec<Option<&str>> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in FENCE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        parts.push(Some(&content[last..whole.start()]));
        parts.push(caps.get(1).map(|m| m.as_str()));
        parts.push(caps.get(2).map(|m| m.as_str()));
        last = whole.end();
    }
    parts.push(Some(&content[last..]));
    parts
}

/// Sequential id source for synthesized blocks.
struct Ids(usize);

impl Ids {
    fn next(&mut self) -> String {
        let id = format!("md-{}", self.0);
        self.0 += 1;
        id
    }
}

/// Convert a markdown-like body into canonical content blocks.
pub fn to_blocks(content: &str) -> Vec<ContentBlock> {
    let parts = partition(content);
    let mut ids = Ids(0);
    let mut blocks = Vec::new();

    for (index, part) in parts.iter().enumerate() {
        match index % 3 {
            0 => prose_blocks(part.unwrap_or_default(), &mut ids, &mut blocks),
            2 => {
                let language = parts[index - 1].unwrap_or(DEFAULT_LANGUAGE).to_string();
                blocks.push(ContentBlock::new(
                    ids.next(),
                    BlockKind::Code {
                        language,
                        code: part.unwrap_or_default().to_string(),
                    },
                ));
            }
            _ => {}
        }
    }

    blocks
}

fn prose_blocks(prose: &str, ids: &mut Ids, blocks: &mut Vec<ContentBlock>) {
    let mut items: Vec<String> = Vec::new();

    for line in prose.lines() {
        if let Some(item) = line.strip_prefix("- ") {
            items.push(item.to_string());
            continue;
        }
        flush_list(&mut items, ids, blocks);

        let kind = if let Some(text) = line.strip_prefix("# ") {
            heading(1, text)
        } else if let Some(text) = line.strip_prefix("## ") {
            heading(2, text)
        } else if let Some(text) = line.strip_prefix("### ") {
            heading(3, text)
        } else if !line.trim().is_empty() {
            BlockKind::Text(line.to_string())
        } else {
            continue;
        };
        blocks.push(ContentBlock::new(ids.next(), kind));
    }
    flush_list(&mut items, ids, blocks);
}

fn heading(level: u8, text: &str) -> BlockKind {
    BlockKind::Heading {
        level,
        text: text.to_string(),
    }
}

fn flush_list(items: &mut Vec<String>, ids: &mut Ids, blocks: &mut Vec<ContentBlock>) {
    if items.is_empty() {
        return;
    }
    blocks.push(ContentBlock::new(
        ids.next(),
        BlockKind::List {
            style: ListStyle::Unordered,
            items: std::mem::take(items),
        },
    ));
}
