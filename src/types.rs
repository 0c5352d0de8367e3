//! The content model shared by every stage.
//!
//! An [`Article`] is flat metadata plus an ordered body of [`ContentBlock`]s.
//! Block order is document order: it drives rendering order and the order of
//! the table of contents. Block ids are rendering keys only.
//!
//! ## Wire Shape
//!
//! Blocks are stored as `{ "id", "type", "content" }` objects where the shape
//! of `content` depends on `type`:
//!
//! ```json
//! { "id": "3", "type": "heading", "content": { "level": 2, "text": "Why Bootloaders Matter" } }
//! { "id": "4", "type": "text", "content": "A bootloader is the first program..." }
//! { "id": "5", "type": "callout", "content": { "type": "info", "title": "Analogy", "message": "..." } }
//! ```
//!
//! Deserialization never fails on a block: an unknown `type`, or a payload that
//! does not fit its `type`, becomes [`BlockKind::Unsupported`] and renders as
//! nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Immutable author reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub social_links: SocialLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl SocialLinks {
    /// Present links as `(label, url)` pairs, in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Website", &self.website),
            ("Twitter", &self.twitter),
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|u| (label, u)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutTone {
    Info,
    Warning,
    Success,
    Error,
}

impl CalloutTone {
    pub fn as_str(self) -> &'static str {
        match self {
            CalloutTone::Info => "info",
            CalloutTone::Warning => "warning",
            CalloutTone::Success => "success",
            CalloutTone::Error => "error",
        }
    }
}

/// The per-type payload of a content block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Text(String),
    Heading {
        level: u8,
        text: String,
    },
    Code {
        language: String,
        code: String,
    },
    Quote {
        text: String,
        author: Option<String>,
    },
    List {
        style: ListStyle,
        items: Vec<String>,
    },
    /// Carries only static copy. The counter lives with each rendered instance.
    InteractiveDemo {
        title: String,
        description: String,
    },
    Callout {
        tone: CalloutTone,
        title: String,
        message: String,
    },
    /// Anything the renderer has no strategy for. Kept so the tag can be logged.
    Unsupported {
        tag: String,
    },
}

impl BlockKind {
    /// The wire `type` tag.
    pub fn tag(&self) -> &str {
        match self {
            BlockKind::Text(_) => "text",
            BlockKind::Heading { .. } => "heading",
            BlockKind::Code { .. } => "code",
            BlockKind::Quote { .. } => "quote",
            BlockKind::List { .. } => "list",
            BlockKind::InteractiveDemo { .. } => "interactive-demo",
            BlockKind::Callout { .. } => "callout",
            BlockKind::Unsupported { tag } => tag,
        }
    }
}

/// One unit of article body content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct ContentBlock {
    pub id: String,
    pub kind: BlockKind,
}

impl ContentBlock {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// All human-readable text carried by this block, for searching and
    /// word counting.
    pub fn plain_text(&self) -> String {
        match &self.kind {
            BlockKind::Text(text) => text.clone(),
            BlockKind::Heading { text, .. } => text.clone(),
            BlockKind::Code { code, .. } => code.clone(),
            BlockKind::Quote { text, author } => match author {
                Some(a) => format!("{text} {a}"),
                None => text.clone(),
            },
            BlockKind::List { items, .. } => items.join(" "),
            BlockKind::InteractiveDemo { title, description } => {
                format!("{title} {description}")
            }
            BlockKind::Callout { title, message, .. } => format!("{title} {message}"),
            BlockKind::Unsupported { .. } => String::new(),
        }
    }
}

/// Serde intermediate matching the wire shape.
#[derive(Serialize, Deserialize)]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Value,
}

#[derive(Deserialize)]
struct HeadingPayload {
    /// Any integer; clamped into `1..=6` on decode.
    level: i64,
    text: String,
}

#[derive(Deserialize)]
struct CodePayload {
    #[serde(default)]
    language: String,
    code: String,
}

#[derive(Deserialize)]
struct QuotePayload {
    text: String,
    #[serde(default)]
    author: Option<String>,
}

#[derive(Deserialize)]
struct ListPayload {
    #[serde(rename = "type")]
    style: ListStyle,
    items: Vec<String>,
}

#[derive(Deserialize)]
struct DemoPayload {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
struct CalloutPayload {
    #[serde(rename = "type")]
    tone: CalloutTone,
    title: String,
    message: String,
}

fn decode_kind(tag: &str, content: Value) -> Option<BlockKind> {
    let kind = match tag {
        "text" => BlockKind::Text(serde_json::from_value(content).ok()?),
        "heading" => {
            let p: HeadingPayload = serde_json::from_value(content).ok()?;
            BlockKind::Heading {
                level: p.level.clamp(1, 6) as u8,
                text: p.text,
            }
        }
        "code" => {
            let p: CodePayload = serde_json::from_value(content).ok()?;
            BlockKind::Code {
                language: p.language,
                code: p.code,
            }
        }
        "quote" => {
            let p: QuotePayload = serde_json::from_value(content).ok()?;
            BlockKind::Quote {
                text: p.text,
                author: p.author,
            }
        }
        "list" => {
            let p: ListPayload = serde_json::from_value(content).ok()?;
            BlockKind::List {
                style: p.style,
                items: p.items,
            }
        }
        "interactive-demo" => {
            let p: DemoPayload = serde_json::from_value(content).ok()?;
            BlockKind::InteractiveDemo {
                title: p.title,
                description: p.description,
            }
        }
        "callout" => {
            let p: CalloutPayload = serde_json::from_value(content).ok()?;
            BlockKind::Callout {
                tone: p.tone,
                title: p.title,
                message: p.message,
            }
        }
        _ => return None,
    };
    Some(kind)
}

impl From<RawBlock> for ContentBlock {
    fn from(raw: RawBlock) -> Self {
        let kind = decode_kind(&raw.kind, raw.content)
            .unwrap_or(BlockKind::Unsupported { tag: raw.kind });
        ContentBlock { id: raw.id, kind }
    }
}

impl From<ContentBlock> for RawBlock {
    fn from(block: ContentBlock) -> Self {
        let kind = block.kind.tag().to_string();
        let content = match block.kind {
            BlockKind::Text(text) => Value::String(text),
            BlockKind::Heading { level, text } => json!({ "level": level, "text": text }),
            BlockKind::Code { language, code } => json!({ "language": language, "code": code }),
            BlockKind::Quote { text, author } => match author {
                Some(a) => json!({ "text": text, "author": a }),
                None => json!({ "text": text }),
            },
            BlockKind::List { style, items } => json!({ "type": style, "items": items }),
            BlockKind::InteractiveDemo { title, description } => {
                json!({ "title": title, "description": description })
            }
            BlockKind::Callout {
                tone,
                title,
                message,
            } => json!({ "type": tone, "title": title, "message": message }),
            BlockKind::Unsupported { .. } => Value::Null,
        };
        RawBlock {
            id: block.id,
            kind,
            content,
        }
    }
}

/// A titled, tagged, authored article with an ordered body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    /// Unique across the collection; the only routing key.
    pub slug: String,
    pub excerpt: String,
    pub content: Vec<ContentBlock>,
    pub author: Author,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Minutes, precomputed at load time.
    pub reading_time: u32,
    pub tags: Vec<String>,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    /// Plain text of the whole body in document order.
    pub fn body_text(&self) -> String {
        self.content
            .iter()
            .map(ContentBlock::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn word_count(&self) -> usize {
        self.body_text().split_whitespace().count()
    }

    pub fn was_updated(&self) -> bool {
        self.updated_at != self.published_at
    }
}

/// One entry of an article's heading outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
}
