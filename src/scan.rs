//! Content loading and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads authors and articles from the content
//! directory and produces a [`Manifest`] that the generate stage consumes.
//! Every article comes out of this stage in canonical form: a block sequence,
//! a resolved author, and a reading time.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                              # Content root
//! ├── config.toml                       # Site configuration (optional)
//! ├── authors.toml                      # Author table keyed by id
//! └── articles/
//!     ├── 010-modern-css.json           # Block-array article
//!     ├── 020-react-performance.md      # Front matter + markdown body
//!     ├── series/                       # Subdirectories are walked too
//!     │   └── 030-minimal-bootloader.md
//!     └── web-trends.json               # Unnumbered = sorted last
//! ```
//!
//! ## Article Formats
//!
//! **JSON** (`*.json`): the wire shape of an article, with `author` given as
//! an id and `content` as an array of `{ "id", "type", "content" }` blocks.
//!
//! **Markdown** (`*.md`): TOML front matter between `+++` lines, then a body
//! converted to blocks by [`markdown::to_blocks`](crate::markdown::to_blocks).
//!
//! ```text
//! +++
//! title = "React Performance Optimization Strategies"
//! author = "mike"
//! publishedAt = "2025-01-10T14:20:00Z"
//! tags = ["React", "Performance"]
//! +++
//! ## Memoization
//! ...
//! ```
//!
//! Both formats share the same keys. Dates are RFC 3339 strings.
//!
//! ## Naming Conventions
//!
//! Article files follow the `NNN-name` convention from [`naming`](crate::naming):
//! the number sets collection order and the name is the slug when the article
//! does not declare one. Unnumbered files sort after numbered ones, by path.
//!
//! ## Validation
//!
//! - Every article's `author` must name an entry in `authors.toml`
//! - Slugs are unique across the collection and URL-safe (`[a-z0-9-]+`)
//! - Unknown keys in authors or article metadata are rejected
//!
//! Articles without `readingTime` get one computed from their word count at
//! the configured reading speed. Articles without `updatedAt` use `publishedAt`.

use crate::config::{self, SiteConfig};
use crate::markdown;
use crate::naming::{is_url_safe, parse_entry_name};
use crate::types::{Article, Author, ContentBlock, SocialLinks};
use chrono::{DateTime, Utc};
use gray_matter::Matter;
use gray_matter::engine::TOML;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid authors file {path}: {source}")]
    Authors {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid front matter in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },
    #[error("Missing +++ front matter in {0}")]
    MissingFrontMatter(PathBuf),
    #[error("Front matter in {0} declares content; markdown articles take their body from the file")]
    ContentInFrontMatter(PathBuf),
    #[error("Unknown author '{author}' in {path}")]
    UnknownAuthor { author: String, path: PathBuf },
    #[error("Duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("Cannot derive a slug from {0}; set `slug` explicitly")]
    EmptySlug(PathBuf),
    #[error("Slug '{slug}' in {path} is not URL-safe; use only a-z, 0-9 and '-'")]
    InvalidSlug { slug: String, path: PathBuf },
    #[error("Slug '{slug}' in {path} is reserved for generated pages")]
    ReservedSlug { slug: String, path: PathBuf },
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Articles in collection order.
    pub articles: Vec<Article>,
    /// All authors, sorted by id, whether or not they wrote anything.
    pub authors: Vec<Author>,
    pub config: SiteConfig,
}

pub const AUTHORS_FILE: &str = "authors.toml";
pub const ARTICLES_DIR: &str = "articles";

/// Top-level output directories the generate stage writes; no article may use them.
const RESERVED_SLUGS: &[&str] = &["tags"];

const FRONT_MATTER_DELIMITER: &str = "+++";

/// An entry of `authors.toml`. The table key is the id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct AuthorEntry {
    name: String,
    #[serde(default)]
    bio: String,
    #[serde(default)]
    avatar: String,
    #[serde(default)]
    social_links: SocialLinks,
}

/// Article metadata as written on disk, shared by both formats.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ArticleSource {
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    excerpt: String,
    author: String,
    published_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    reading_time: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    cover_image: String,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Config first: reading speed feeds the reading-time fallback
    let config = config::load_config(root)?;
    let authors = load_authors(&root.join(AUTHORS_FILE))?;
    let articles = load_articles(
        &root.join(ARTICLES_DIR),
        &authors,
        config.reading.words_per_minute,
    )?;

    info!(
        articles = articles.len(),
        authors = authors.len(),
        "scanned {}",
        root.display()
    );

    Ok(Manifest {
        articles,
        authors: authors.into_values().collect(),
        config,
    })
}

/// Load `authors.toml` into a map keyed by id.
///
/// A missing file yields an empty map; any article then fails with
/// [`ScanError::UnknownAuthor`].
fn load_authors(path: &Path) -> Result<BTreeMap<String, Author>, ScanError> {
    if !path.exists() {
        debug!("no {} found", AUTHORS_FILE);
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path)?;
    let entries: BTreeMap<String, AuthorEntry> =
        toml::from_str(&content).map_err(|source| ScanError::Authors {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(entries
        .into_iter()
        .map(|(id, entry)| {
            let author = Author {
                id: id.clone(),
                name: entry.name,
                bio: entry.bio,
                avatar: entry.avatar,
                social_links: entry.social_links,
            };
            (id, author)
        })
        .collect())
}

/// Collect article files under `dir`, sorted into collection order.
fn collect_article_files(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && article_format(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }

    files.sort_by_cached_key(|path| {
        let number = file_stem(path)
            .and_then(|stem| parse_entry_name(&stem).number)
            .unwrap_or(u32::MAX);
        (number, path.clone())
    });
    Ok(files)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ArticleFormat {
    Json,
    Markdown,
}

fn article_format(path: &Path) -> Option<ArticleFormat> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "json" => Some(ArticleFormat::Json),
        "md" => Some(ArticleFormat::Markdown),
        _ => None,
    }
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().to_string())
}

fn load_articles(
    dir: &Path,
    authors: &BTreeMap<String, Author>,
    words_per_minute: u32,
) -> Result<Vec<Article>, ScanError> {
    let files = collect_article_files(dir)?;
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut articles = Vec::with_capacity(files.len());

    for path in files {
        let article = load_article(&path, authors, words_per_minute)?;
        if let Some(first) = seen.get(&article.slug) {
            return Err(ScanError::DuplicateSlug {
                slug: article.slug,
                first: first.clone(),
                second: path,
            });
        }
        debug!(slug = %article.slug, blocks = article.content.len(), "loaded {}", path.display());
        seen.insert(article.slug.clone(), path);
        articles.push(article);
    }

    Ok(articles)
}

fn load_article(
    path: &Path,
    authors: &BTreeMap<String, Author>,
    words_per_minute: u32,
) -> Result<Article, ScanError> {
    let raw = fs::read_to_string(path)?;
    let source = match article_format(path) {
        Some(ArticleFormat::Markdown) => parse_markdown_article(path, &raw)?,
        _ => serde_json::from_str(&raw).map_err(|source| ScanError::Json {
            path: path.to_path_buf(),
            source,
        })?,
    };
    resolve_article(path, source, authors, words_per_minute)
}

fn parse_markdown_article(path: &Path, raw: &str) -> Result<ArticleSource, ScanError> {
    let mut matter = Matter::<TOML>::new();
    matter.delimiter = FRONT_MATTER_DELIMITER.to_string();
    let parsed = matter.parse(raw);

    let data = parsed
        .data
        .ok_or_else(|| ScanError::MissingFrontMatter(path.to_path_buf()))?;
    let mut source: ArticleSource =
        data.deserialize().map_err(|e| ScanError::FrontMatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    if !source.content.is_empty() {
        return Err(ScanError::ContentInFrontMatter(path.to_path_buf()));
    }
    source.content = markdown::to_blocks(&parsed.content);
    Ok(source)
}

/// Turn on-disk metadata into a canonical [`Article`].
fn resolve_article(
    path: &Path,
    source: ArticleSource,
    authors: &BTreeMap<String, Author>,
    words_per_minute: u32,
) -> Result<Article, ScanError> {
    let author = authors
        .get(&source.author)
        .cloned()
        .ok_or_else(|| ScanError::UnknownAuthor {
            author: source.author.clone(),
            path: path.to_path_buf(),
        })?;

    let slug = match source.slug {
        Some(slug) => slug,
        None => {
            let stem = file_stem(path).unwrap_or_default();
            parse_entry_name(&stem).slug
        }
    };
    if slug.trim().is_empty() {
        return Err(ScanError::EmptySlug(path.to_path_buf()));
    }
    if !is_url_safe(&slug) {
        return Err(ScanError::InvalidSlug {
            slug,
            path: path.to_path_buf(),
        });
    }
    if RESERVED_SLUGS.contains(&slug.as_str()) {
        return Err(ScanError::ReservedSlug {
            slug,
            path: path.to_path_buf(),
        });
    }

    let mut article = Article {
        id: source.id.unwrap_or_else(|| slug.clone()),
        title: source.title,
        slug,
        excerpt: source.excerpt,
        content: source.content,
        author,
        published_at: source.published_at,
        updated_at: source.updated_at.unwrap_or(source.published_at),
        reading_time: 0,
        tags: source.tags,
        cover_image: source.cover_image,
        featured: source.featured,
    };
    article.reading_time = source
        .reading_time
        .unwrap_or_else(|| estimate_reading_time(article.word_count(), words_per_minute));
    Ok(article)
}

/// Whole minutes to read `words`, never less than one.
pub fn estimate_reading_time(words: usize, words_per_minute: u32) -> u32 {
    let rate = words_per_minute.max(1) as usize;
    (words.div_ceil(rate) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::BlockKind;
    use tempfile::TempDir;

    const AUTHORS: &str = r#"
[mike]
name = "Mike Chen"
"#;

    fn write_article(root: &Path, name: &str, content: &str) {
        let path = root.join(ARTICLES_DIR).join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn content_root(authors: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(AUTHORS_FILE), authors).unwrap();
        fs::create_dir_all(tmp.path().join(ARTICLES_DIR)).unwrap();
        tmp
    }

    fn md(title: &str, extra: &str, body: &str) -> String {
        format!(
            "+++\ntitle = \"{title}\"\nauthor = \"mike\"\npublishedAt = \"2025-01-10T14:20:00Z\"\n{extra}+++\n{body}"
        )
    }

    // =========================================================================
    // Fixture scans
    // =========================================================================

    #[test]
    fn scan_finds_all_articles() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.articles.len(), 4);
    }

    #[test]
    fn articles_in_number_order_unnumbered_last() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(
            article_slugs(&manifest.articles),
            vec![
                "modern-css-beautiful-ui-design",
                "react-performance",
                "minimal-bootloader",
                "web-trends",
            ]
        );
    }

    #[test]
    fn authors_resolved_by_id() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let css = find_article(&manifest.articles, "modern-css-beautiful-ui-design");
        assert_eq!(css.author.id, "sarah");
        assert_eq!(css.author.name, "Sarah Johnson");
        assert_eq!(
            css.author.social_links.twitter.as_deref(),
            Some("https://twitter.com/sarahj")
        );
    }

    #[test]
    fn authors_listed_sorted_by_id() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let ids: Vec<&str> = manifest.authors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["aayush", "john", "mike", "sarah"]);
    }

    #[test]
    fn markdown_article_converted_to_blocks() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let react = find_article(&manifest.articles, "react-performance");
        assert!(react.content.iter().any(|b| matches!(
            &b.kind,
            BlockKind::Heading { level: 2, text } if text == "Memoization"
        )));
        assert!(react
            .content
            .iter()
            .any(|b| matches!(&b.kind, BlockKind::Code { language, .. } if language == "javascript")));
    }

    #[test]
    fn unknown_block_type_kept_as_unsupported() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let css = find_article(&manifest.articles, "modern-css-beautiful-ui-design");
        assert!(css
            .content
            .iter()
            .any(|b| matches!(&b.kind, BlockKind::Unsupported { tag } if tag == "video")));
    }

    #[test]
    fn nested_directories_are_walked() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let boot = find_article(&manifest.articles, "minimal-bootloader");
        assert!(boot.featured);
    }

    #[test]
    fn config_loaded_from_fixtures() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Fixture Notes");
    }

    #[test]
    fn declared_reading_time_kept() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let css = find_article(&manifest.articles, "modern-css-beautiful-ui-design");
        assert_eq!(css.reading_time, 6);
    }

    #[test]
    fn updated_at_defaults_to_published_at() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let trends = find_article(&manifest.articles, "web-trends");
        assert!(!trends.was_updated());
    }

    // =========================================================================
    // Slug and id derivation
    // =========================================================================

    #[test]
    fn slug_from_filename_without_number() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "040-hooks-in-depth.md", &md("Hooks", "", "Body"));
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.articles[0].slug, "hooks-in-depth");
        assert_eq!(manifest.articles[0].id, "hooks-in-depth");
    }

    #[test]
    fn declared_slug_wins_over_filename() {
        let tmp = content_root(AUTHORS);
        write_article(
            tmp.path(),
            "010-draft.md",
            &md("Hooks", "slug = \"react-hooks\"\n", "Body"),
        );
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.articles[0].slug, "react-hooks");
    }

    #[test]
    fn number_only_filename_needs_slug() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "010.md", &md("Hooks", "", "Body"));
        assert!(matches!(scan(tmp.path()), Err(ScanError::EmptySlug(_))));
    }

    #[test]
    fn reserved_slug_is_error() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "010-tags.md", &md("Tags", "", "Body"));
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::ReservedSlug { .. })
        ));
    }

    #[test]
    fn traversal_slug_is_rejected() {
        for slug in ["../escaped", "/etc/blog", "nested/page", ".."] {
            let tmp = content_root(AUTHORS);
            let extra = format!("slug = \"{slug}\"\n");
            write_article(tmp.path(), "010-a.md", &md("A", &extra, "Body"));
            let err = scan(tmp.path()).unwrap_err();
            assert!(
                matches!(err, ScanError::InvalidSlug { slug: ref s, .. } if s == slug),
                "{slug:?} gave {err}"
            );
        }
    }

    #[test]
    fn filename_slug_with_spaces_is_rejected() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "010-My Post.md", &md("A", "", "Body"));
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::InvalidSlug { ref slug, .. } if slug == "my post"));
    }

    #[test]
    fn uppercase_declared_slug_is_rejected() {
        let tmp = content_root(AUTHORS);
        write_article(
            tmp.path(),
            "010-a.json",
            r#"{"title": "A", "author": "mike", "slug": "My-Post",
                "publishedAt": "2025-01-10T14:20:00Z"}"#,
        );
        assert!(matches!(scan(tmp.path()), Err(ScanError::InvalidSlug { .. })));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn unknown_author_is_error() {
        let tmp = content_root("[sarah]\nname = \"Sarah Johnson\"\n");
        write_article(tmp.path(), "010-a.md", &md("A", "", "Body"));
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::UnknownAuthor { ref author, .. } if author == "mike"));
    }

    #[test]
    fn missing_authors_file_means_every_author_is_unknown() {
        let tmp = TempDir::new().unwrap();
        write_article(tmp.path(), "010-a.md", &md("A", "", "Body"));
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::UnknownAuthor { .. })
        ));
    }

    #[test]
    fn duplicate_slug_is_error() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "010-same.md", &md("One", "", "Body"));
        write_article(tmp.path(), "nested/020-same.md", &md("Two", "", "Body"));
        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(err, ScanError::DuplicateSlug { ref slug, .. } if slug == "same"));
    }

    #[test]
    fn unknown_front_matter_key_is_error() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "010-a.md", &md("A", "pubDate = \"x\"\n", "Body"));
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::FrontMatter { .. })
        ));
    }

    #[test]
    fn markdown_without_front_matter_is_error() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "010-a.md", "# Just a heading\n");
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::MissingFrontMatter(_))
        ));
    }

    #[test]
    fn invalid_json_is_error() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), "010-a.json", "{ not json");
        assert!(matches!(scan(tmp.path()), Err(ScanError::Json { .. })));
    }

    #[test]
    fn invalid_authors_file_is_error() {
        let tmp = content_root("[mike]\nnickname = \"m\"\n");
        assert!(matches!(scan(tmp.path()), Err(ScanError::Authors { .. })));
    }

    #[test]
    fn no_articles_dir_is_empty_collection() {
        let tmp = TempDir::new().unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.articles.is_empty());
        assert!(manifest.authors.is_empty());
    }

    #[test]
    fn hidden_and_foreign_files_ignored() {
        let tmp = content_root(AUTHORS);
        write_article(tmp.path(), ".010-hidden.md", &md("Hidden", "", "Body"));
        write_article(tmp.path(), "notes.txt", "scratch");
        write_article(tmp.path(), "020-shown.md", &md("Shown", "", "Body"));
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(article_slugs(&manifest.articles), vec!["shown"]);
    }

    // =========================================================================
    // Reading time
    // =========================================================================

    #[test]
    fn reading_time_computed_when_missing() {
        let tmp = content_root(AUTHORS);
        let body = "word ".repeat(450);
        write_article(tmp.path(), "010-long.md", &md("Long", "", &body));
        let manifest = scan(tmp.path()).unwrap();
        // 450 words at 200 wpm
        assert_eq!(manifest.articles[0].reading_time, 3);
    }

    #[test]
    fn reading_time_uses_configured_rate() {
        let tmp = content_root(AUTHORS);
        fs::write(
            tmp.path().join("config.toml"),
            "[reading]\nwords_per_minute = 100\n",
        )
        .unwrap();
        let body = "word ".repeat(450);
        write_article(tmp.path(), "010-long.md", &md("Long", "", &body));
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.articles[0].reading_time, 5);
    }

    #[test]
    fn estimate_reading_time_minimum_is_one() {
        assert_eq!(estimate_reading_time(0, 200), 1);
        assert_eq!(estimate_reading_time(1, 200), 1);
        assert_eq!(estimate_reading_time(201, 200), 2);
    }

    // =========================================================================
    // Front matter
    // =========================================================================

    #[test]
    fn front_matter_body_becomes_blocks() {
        let source = parse_markdown_article(
            Path::new("010-a.md"),
            &md("A", "readingTime = 4\nfeatured = true\n", "## Intro\n\nHello there.\n"),
        )
        .unwrap();
        assert_eq!(source.title, "A");
        assert_eq!(source.reading_time, Some(4));
        assert!(source.featured);
        assert_eq!(
            source.content.iter().map(|b| b.kind.clone()).collect::<Vec<_>>(),
            vec![
                BlockKind::Heading {
                    level: 2,
                    text: "Intro".into()
                },
                BlockKind::Text("Hello there.".into()),
            ]
        );
    }

    #[test]
    fn front_matter_missing_required_key_is_error() {
        let raw = "+++\ntitle = \"A\"\n+++\nBody\n";
        assert!(matches!(
            parse_markdown_article(Path::new("a.md"), raw),
            Err(ScanError::FrontMatter { .. })
        ));
    }

    #[test]
    fn front_matter_content_key_is_error() {
        let tmp = content_root(AUTHORS);
        write_article(
            tmp.path(),
            "010-a.md",
            &md(
                "A",
                "[[content]]\nid = \"1\"\ntype = \"text\"\ncontent = \"x\"\n",
                "Body",
            ),
        );
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::ContentInFrontMatter(_))
        ));
    }

    #[test]
    fn manifest_roundtrips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.articles, manifest.articles);
        assert_eq!(back.config.site.title, manifest.config.site.title);
    }
}
