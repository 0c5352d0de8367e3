//! Content block rendering.
//!
//! [`render_block`] maps one [`ContentBlock`] to maud [`Markup`]. Dispatch is
//! a single exhaustive match over [`BlockKind`], so every variant has exactly
//! one rendering. [`BlockKind::Unsupported`] renders as empty markup: an
//! unknown block never fails the page and never hides its siblings.
//!
//! ## Per-Block Output
//!
//! | Block | Markup |
//! |-------|--------|
//! | text | `<p>` |
//! | heading | `<h1>`..`<h6>` with `id = slugify(text)` (same ids as the TOC) |
//! | code | `<figure class="code-block">` with language label and `<pre><code>` |
//! | quote | `<blockquote>` with optional `<cite>` |
//! | list | `<ol>` or `<ul>`, items in order |
//! | interactive-demo | counter widget, count starts at 0 |
//! | callout | `<aside class="callout callout-{tone}">` |
//!
//! ## Highlighting
//!
//! Code is handed to a [`Highlighter`] untouched: no trimming, no
//! reindenting. A highlighter that cannot handle the language returns an
//! error and the block falls back to escaped plain text.

use crate::toc::slugify;
use crate::types::{BlockKind, ContentBlock, ListStyle};
use maud::{Markup, html};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    #[error("no highlighting rules for language '{0}'")]
    UnknownLanguage(String),
}

/// Syntax highlighting collaborator for code blocks.
///
/// Implementations receive the raw code text and the block's language tag
/// and return escaped, annotated markup. Errors are never fatal: the
/// renderer falls back to plain text.
pub trait Highlighter: Sync {
    fn highlight(&self, code: &str, language: &str) -> Result<Markup, HighlightError>;
}

/// Escapes code without annotating it. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> Result<Markup, HighlightError> {
        Ok(html! { (code) })
    }
}

/// Wraps keywords, strings, numbers and comments in `tok-*` spans for a
/// fixed set of languages.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordHighlighter;

impl Highlighter for KeywordHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<Markup, HighlightError> {
        let tokens = tokenize(code, language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_string()))?;
        Ok(html! {
            @for token in &tokens {
                @match token.kind {
                    TokenKind::Plain => { (token.text) }
                    kind => { span class=(kind.class()) { (token.text) } }
                }
            }
        })
    }
}

/// Pick the highlighter for the `highlight.enabled` setting.
pub fn highlighter(enabled: bool) -> &'static dyn Highlighter {
    if enabled {
        &KeywordHighlighter
    } else {
        &PlainHighlighter
    }
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Keyword,
    String,
    Number,
    Comment,
}

impl TokenKind {
    fn class(self) -> &'static str {
        match self {
            TokenKind::Plain => "",
            TokenKind::Keyword => "tok-kw",
            TokenKind::String => "tok-str",
            TokenKind::Number => "tok-num",
            TokenKind::Comment => "tok-com",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

struct Language {
    names: &'static [&'static str],
    keywords: &'static [&'static str],
    /// Regex fragment matching a whole comment.
    comment: &'static str,
    case_insensitive: bool,
}

const C_COMMENT: &str = r"//[^\n]*|/\*[\s\S]*?\*/";

const LANGUAGES: &[Language] = &[
    Language {
        names: &["javascript", "js", "jsx", "typescript", "ts", "tsx"],
        keywords: &[
            "async", "await", "break", "case", "class", "const", "continue", "default",
            "else", "export", "extends", "false", "for", "from", "function", "if", "import",
            "interface", "let", "new", "null", "return", "switch", "this", "throw", "true",
            "try", "type", "undefined", "var", "while",
        ],
        comment: C_COMMENT,
        case_insensitive: false,
    },
    Language {
        names: &["rust", "rs"],
        keywords: &[
            "as", "async", "await", "const", "crate", "else", "enum", "false", "fn", "for",
            "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
            "return", "self", "Self", "static", "struct", "trait", "true", "type", "use",
            "where", "while",
        ],
        comment: C_COMMENT,
        case_insensitive: false,
    },
    Language {
        names: &["css", "scss"],
        keywords: &[
            "auto", "important", "inherit", "initial", "none", "solid", "transparent",
            "unset",
        ],
        comment: r"/\*[\s\S]*?\*/",
        case_insensitive: false,
    },
    Language {
        names: &["python", "py"],
        keywords: &[
            "and", "as", "class", "def", "elif", "else", "except", "False", "finally", "for",
            "from", "if", "import", "in", "lambda", "None", "not", "or", "pass", "return",
            "True", "try", "while", "with", "yield",
        ],
        comment: r"#[^\n]*",
        case_insensitive: false,
    },
    Language {
        names: &["bash", "sh", "shell", "zsh"],
        keywords: &[
            "case", "do", "done", "echo", "elif", "else", "esac", "export", "fi", "for",
            "function", "if", "in", "local", "return", "then", "while",
        ],
        comment: r"#[^\n]*",
        case_insensitive: false,
    },
    Language {
        names: &["nasm", "asm", "x86asm", "assembly"],
        keywords: &[
            "add", "bits", "call", "cli", "cmp", "db", "dw", "hlt", "inc", "int", "jc", "je",
            "jmp", "jne", "jz", "lodsb", "mov", "org", "or", "pop", "push", "ret", "sti",
            "sub", "times", "xor",
        ],
        comment: r";[^\n]*",
        case_insensitive: true,
    },
];

struct CompiledLanguage {
    language: &'static Language,
    pattern: Regex,
}

static COMPILED: LazyLock<Vec<CompiledLanguage>> = LazyLock::new(|| {
    LANGUAGES
        .iter()
        .map(|language| {
            let pattern = format!(
                r#"(?P<comment>{})|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*')|(?P<number>\b\d[\w.]*)|(?P<word>[A-Za-z_][\w]*)"#,
                language.comment
            );
            CompiledLanguage {
                language,
                pattern: Regex::new(&pattern).expect("token pattern must compile"),
            }
        })
        .collect()
});

fn lookup(language: &str) -> Option<&'static CompiledLanguage> {
    let name = language.to_ascii_lowercase();
    COMPILED
        .iter()
        .find(|c| c.language.names.contains(&name.as_str()))
}

/// Split `code` into tokens for `language`.
///
/// Returns `None` for unknown languages. Concatenating the token texts
/// always reproduces `code` exactly.
pub fn tokenize<'a>(code: &'a str, language: &str) -> Option<Vec<Token<'a>>> {
    let compiled = lookup(language)?;
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in compiled.pattern.captures_iter(code) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            tokens.push(Token {
                kind: TokenKind::Plain,
                text: &code[last..whole.start()],
            });
        }
        let kind = if caps.name("comment").is_some() {
            TokenKind::Comment
        } else if caps.name("string").is_some() {
            TokenKind::String
        } else if caps.name("number").is_some() {
            TokenKind::Number
        } else if is_keyword(compiled.language, whole.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Plain
        };
        tokens.push(Token {
            kind,
            text: whole.as_str(),
        });
        last = whole.end();
    }
    if last < code.len() {
        tokens.push(Token {
            kind: TokenKind::Plain,
            text: &code[last..],
        });
    }
    Some(tokens)
}

fn is_keyword(language: &Language, word: &str) -> bool {
    if language.case_insensitive {
        language
            .keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(word))
    } else {
        language.keywords.contains(&word)
    }
}

// ============================================================================
// Interactive demo state
// ============================================================================

/// State of one interactive demo widget.
///
/// Every rendered widget owns a fresh counter starting at zero. Nothing is
/// shared between instances or persisted across views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoCounter {
    count: u32,
}

impl DemoCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

// ============================================================================
// Block rendering
// ============================================================================

/// Render one block.
pub fn render_block(block: &ContentBlock, highlighter: &dyn Highlighter) -> Markup {
    match &block.kind {
        BlockKind::Text(text) => html! { p { (text) } },
        BlockKind::Heading { level, text } => render_heading(*level, text),
        BlockKind::Code { language, code } => {
            let body = match highlighter.highlight(code, language) {
                Ok(markup) => markup,
                Err(e) => {
                    warn!(block = %block.id, "{e}; rendering as plain text");
                    html! { (code) }
                }
            };
            html! {
                figure.code-block data-language=(language) {
                    figcaption.code-language { (language) }
                    pre { code class={ "language-" (language) } { (body) } }
                }
            }
        }
        BlockKind::Quote { text, author } => html! {
            blockquote.quote {
                p { (text) }
                @if let Some(author) = author {
                    footer { cite { (author) } }
                }
            }
        },
        BlockKind::List { style, items } => match style {
            ListStyle::Ordered => html! {
                ol { @for item in items { li { (item) } } }
            },
            ListStyle::Unordered => html! {
                ul { @for item in items { li { (item) } } }
            },
        },
        BlockKind::InteractiveDemo { title, description } => {
            let counter = DemoCounter::new();
            html! {
                div.interactive-demo data-demo="counter" {
                    h4 { (title) }
                    p { (description) }
                    div.demo-controls {
                        output.demo-count { (counter.count()) }
                        button.demo-increment type="button" { "Click Me!" }
                        button.demo-reset type="button" { "Reset" }
                    }
                }
            }
        }
        BlockKind::Callout {
            tone,
            title,
            message,
        } => html! {
            aside class={ "callout callout-" (tone.as_str()) } role="note" {
                h4.callout-title { (title) }
                p { (message) }
            }
        },
        BlockKind::Unsupported { tag } => {
            debug!(block = %block.id, tag = %tag, "skipping unsupported block");
            html! {}
        }
    }
}

fn render_heading(level: u8, text: &str) -> Markup {
    let id = slugify(text);
    match level {
        1 => html! { h1 id=(id) { (text) } },
        2 => html! { h2 id=(id) { (text) } },
        3 => html! { h3 id=(id) { (text) } },
        4 => html! { h4 id=(id) { (text) } },
        5 => html! { h5 id=(id) { (text) } },
        _ => html! { h6 id=(id) { (text) } },
    }
}

/// Render a block sequence, one markup fragment per block, in order.
pub fn render_blocks(blocks: &[ContentBlock], highlighter: &dyn Highlighter) -> Vec<Markup> {
    blocks
        .iter()
        .map(|block| render_block(block, highlighter))
        .collect()
}

/// Render a block sequence as one fragment.
pub fn render_body(blocks: &[ContentBlock], highlighter: &dyn Highlighter) -> Markup {
    html! {
        @for block in blocks {
            (render_block(block, highlighter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::CalloutTone;

    fn render(block: &ContentBlock) -> String {
        render_block(block, &KeywordHighlighter).into_string()
    }

    fn block(kind: BlockKind) -> ContentBlock {
        ContentBlock::new("b", kind)
    }

    /// Records calls so tests can check what the renderer hands over.
    #[derive(Default)]
    struct RecordingHighlighter {
        calls: std::sync::Mutex<Vec<(String, String)>>,
    }

    impl Highlighter for RecordingHighlighter {
        fn highlight(&self, code: &str, language: &str) -> Result<Markup, HighlightError> {
            self.calls
                .lock()
                .unwrap()
                .push((code.to_string(), language.to_string()));
            Ok(html! { "highlighted" })
        }
    }

    struct FailingHighlighter;

    impl Highlighter for FailingHighlighter {
        fn highlight(&self, _code: &str, language: &str) -> Result<Markup, HighlightError> {
            Err(HighlightError::UnknownLanguage(language.to_string()))
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    #[test]
    fn text_is_paragraph() {
        assert_eq!(render(&text("Hello")), "<p>Hello</p>");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(render(&text("<b>x</b>")), "<p>&lt;b&gt;x&lt;/b&gt;</p>");
    }

    #[test]
    fn heading_uses_level_and_slug_id() {
        assert_eq!(
            render(&heading(2, "Glass Morphism Effects")),
            r#"<h2 id="glass-morphism-effects">Glass Morphism Effects</h2>"#
        );
        assert!(render(&heading(6, "Deep")).starts_with("<h6"));
    }

    #[test]
    fn heading_ids_match_toc() {
        let article = article_with_blocks(vec![heading(2, "What's New in 2025?")]);
        let toc = crate::toc::extract_toc(&article);
        let html = render(&article.content[0]);
        assert!(html.contains(&format!(r#"id="{}""#, toc[0].id)));
    }

    #[test]
    fn unknown_block_renders_nothing() {
        let bogus: ContentBlock =
            serde_json::from_str(r#"{"id":"x","type":"bogus","content":{}}"#).unwrap();
        assert_eq!(render(&bogus), "");
    }

    #[test]
    fn unknown_block_does_not_hide_siblings() {
        let bogus = block(BlockKind::Unsupported {
            tag: "video".into(),
        });
        let blocks = vec![text("before"), bogus, text("after")];
        let rendered = render_blocks(&blocks, &PlainHighlighter);
        assert_eq!(rendered.len(), 3);
        assert_eq!(
            render_body(&blocks, &PlainHighlighter).into_string(),
            "<p>before</p><p>after</p>"
        );
    }

    #[test]
    fn ordered_and_unordered_lists_keep_item_order() {
        let items = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let ol = render(&block(BlockKind::List {
            style: ListStyle::Ordered,
            items: items.clone(),
        }));
        assert_eq!(ol, "<ol><li>c</li><li>a</li><li>b</li></ol>");
        let ul = render(&block(BlockKind::List {
            style: ListStyle::Unordered,
            items,
        }));
        assert_eq!(ul, "<ul><li>c</li><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn quote_with_and_without_author() {
        let with = render(&block(BlockKind::Quote {
            text: "Less is more.".into(),
            author: Some("Mies".into()),
        }));
        assert!(with.contains("<cite>Mies</cite>"));
        let without = render(&block(BlockKind::Quote {
            text: "Less is more.".into(),
            author: None,
        }));
        assert!(!without.contains("<cite>"));
    }

    #[test]
    fn callout_carries_tone_class() {
        let html = render(&block(BlockKind::Callout {
            tone: CalloutTone::Warning,
            title: "Browser Support".into(),
            message: "Check caniuse.".into(),
        }));
        assert!(html.contains(r#"class="callout callout-warning""#));
        assert!(html.contains("Browser Support"));
    }

    #[test]
    fn demo_starts_at_zero() {
        let html = render(&block(BlockKind::InteractiveDemo {
            title: "Try It".into(),
            description: "Click.".into(),
        }));
        assert!(html.contains(r#"<output class="demo-count">0</output>"#));
    }

    // =========================================================================
    // Code blocks and highlighting
    // =========================================================================

    #[test]
    fn code_passed_to_highlighter_unmodified() {
        let src = "  fn main() {\n\n      let x = 1;\n  }\n";
        let recorder = RecordingHighlighter::default();
        let html = render_block(&code("rust", src), &recorder).into_string();
        assert_eq!(
            *recorder.calls.lock().unwrap(),
            vec![(src.to_string(), "rust".to_string())]
        );
        assert!(html.contains("highlighted"));
        assert!(html.contains(r#"class="language-rust""#));
    }

    #[test]
    fn highlight_failure_falls_back_to_plain_text() {
        let html = render_block(&code("cobol", "a < b"), &FailingHighlighter).into_string();
        assert!(html.contains("<code class=\"language-cobol\">a &lt; b</code>"));
    }

    #[test]
    fn keyword_highlighter_unknown_language_is_error() {
        let err = KeywordHighlighter.highlight("x", "cobol").unwrap_err();
        assert_eq!(err, HighlightError::UnknownLanguage("cobol".into()));
    }

    #[test]
    fn keyword_highlighter_marks_tokens() {
        let html = KeywordHighlighter
            .highlight("const x = \"hi\"; // done", "javascript")
            .unwrap()
            .into_string();
        assert!(html.contains(r#"<span class="tok-kw">const</span>"#));
        assert!(html.contains(r#"<span class="tok-str">&quot;hi&quot;</span>"#));
        assert!(html.contains(r#"<span class="tok-com">// done</span>"#));
    }

    #[test]
    fn plain_highlighter_only_escapes() {
        let html = PlainHighlighter.highlight("a && b", "rust").unwrap();
        assert_eq!(html.into_string(), "a &amp;&amp; b");
    }

    #[test]
    fn tokens_reassemble_to_source() {
        let src = "mov ah, 0x02 ; read\nINT 0x13\n\"str\" 'c'";
        let tokens = tokenize(src, "nasm").unwrap();
        let joined: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(joined, src);
    }

    #[test]
    fn assembly_keywords_are_case_insensitive() {
        let tokens = tokenize("INT 0x13", "nasm").unwrap();
        assert_eq!(
            tokens[0],
            Token {
                kind: TokenKind::Keyword,
                text: "INT"
            }
        );
        assert_eq!(tokens[2].kind, TokenKind::Number);
    }

    #[test]
    fn identifiers_with_digits_are_not_numbers() {
        let tokens = tokenize("x86", "rust").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Plain);
    }

    #[test]
    fn language_lookup_ignores_case_and_aliases() {
        assert!(tokenize("x", "TypeScript").is_some());
        assert!(tokenize("x", "py").is_some());
        assert!(tokenize("x", "").is_none());
    }

    #[test]
    fn highlighter_follows_config_flag() {
        let on = highlighter(true).highlight("fn", "rust").unwrap().into_string();
        assert!(on.contains("tok-kw"));
        let off = highlighter(false).highlight("fn", "rust").unwrap().into_string();
        assert_eq!(off, "fn");
    }

    // =========================================================================
    // Demo counter
    // =========================================================================

    #[test]
    fn demo_counter_increments_and_resets() {
        let mut counter = DemoCounter::new();
        assert_eq!(counter.count(), 0);
        counter.increment();
        assert_eq!(counter.increment(), 2);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn demo_counters_are_independent() {
        let mut first = DemoCounter::new();
        let second = DemoCounter::new();
        first.increment();
        assert_eq!(first.count(), 1);
        assert_eq!(second.count(), 0);
    }
}
