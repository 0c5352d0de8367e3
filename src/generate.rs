//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and renders the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): featured articles, the full article list,
//!   a tag cloud and a search box
//! - **Article pages** (`/{slug}/index.html`): header, table of contents,
//!   rendered body, author card and reading-progress bar
//! - **Tag pages** (`/tags/{tag}/index.html`): every article carrying the tag
//! - **Tag overview** (`/tags/index.html`): all tags with counts
//!
//! ## Data Files
//!
//! - `posts.json`: article summaries, newest first
//! - `search-index.json`: per-article search fields in collection order,
//!   loaded by the index page script for live filtering
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── posts.json
//! ├── search-index.json
//! ├── modern-css-beautiful-ui-design/
//! │   └── index.html
//! └── tags/
//!     ├── index.html
//!     ├── css/
//!     │   └── index.html
//!     └── ui-ux/
//!         └── index.html
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/reader.js`: Search filtering, reading progress, TOC scroll spy,
//!   demo counters
//!
//! The script mirrors the matching rules of [`search::filter`] and the
//! arithmetic of [`progress::compute_progress`] and [`toc::active_section`].
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Article and tag pages are rendered in parallel with rayon.

use crate::config::{self, SiteConfig};
use crate::naming::is_url_safe;
use crate::progress::ReadingProgress;
use crate::render::{self, Highlighter};
use crate::scan::Manifest;
use crate::search::{self, TagIndex};
use crate::toc::{self, indent_level, slugify};
use crate::types::{Article, Author};
use chrono::{DateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Article slug '{0}' is not a single URL-safe path segment")]
    UnsafeSlug(String),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/reader.js");

pub const POSTS_FILE: &str = "posts.json";
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// One written page, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

/// What a generate run wrote.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub articles: Vec<GeneratedPage>,
    /// Tag pages, in tag cloud order, with article counts.
    pub tags: Vec<(GeneratedPage, usize)>,
    pub data_files: Vec<String>,
}

/// Read a manifest written by the scan stage and generate the site.
pub fn generate(manifest_path: &Path, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, output_dir)
}

/// Generate the site for an in-memory manifest.
pub fn generate_site(manifest: &Manifest, output_dir: &Path) -> Result<GenerateReport, GenerateError> {
    let site = Site::new(manifest);
    fs::create_dir_all(output_dir)?;

    fs::write(output_dir.join("index.html"), render_index(&site).into_string())?;
    debug!("generated index.html");

    let articles = manifest
        .articles
        .par_iter()
        .map(|article| write_article_page(&site, article, output_dir))
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let tags_dir = output_dir.join("tags");
    fs::create_dir_all(&tags_dir)?;
    fs::write(
        tags_dir.join("index.html"),
        render_tags_overview(&site).into_string(),
    )?;
    let tags = site
        .cloud
        .par_iter()
        .map(|entry| {
            write_tag_page(&site, &entry.tag, output_dir).map(|page| (page, entry.count))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;

    let posts = post_summaries(&manifest.articles, &manifest.config.site.base_url);
    fs::write(
        output_dir.join(POSTS_FILE),
        serde_json::to_string_pretty(&posts)?,
    )?;
    let search_index = search_entries(&manifest.articles);
    fs::write(
        output_dir.join(SEARCH_INDEX_FILE),
        serde_json::to_string(&search_index)?,
    )?;

    info!(
        articles = articles.len(),
        tags = tags.len(),
        "site generated at {}",
        output_dir.display()
    );

    Ok(GenerateReport {
        articles,
        tags,
        data_files: vec![POSTS_FILE.to_string(), SEARCH_INDEX_FILE.to_string()],
    })
}

/// Everything page renderers share, computed once per run.
struct Site<'a> {
    manifest: &'a Manifest,
    config: &'a SiteConfig,
    css: String,
    cloud: Vec<search::TagCount>,
    max_count: usize,
    tag_slugs: HashMap<String, String>,
    highlighter: &'static dyn Highlighter,
}

impl<'a> Site<'a> {
    fn new(manifest: &'a Manifest) -> Self {
        let config = &manifest.config;
        let color_css = config::generate_color_css(&config.colors, config.theme.mode);
        let index = search::aggregate_tags(&manifest.articles);
        Self {
            manifest,
            config,
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            cloud: index.sorted(config.tags.cloud_order),
            max_count: index.max_count(),
            tag_slugs: tag_slugs(&index),
            highlighter: render::highlighter(config.highlight.enabled),
        }
    }

    /// Site-relative URL under `site.base_url`.
    fn href(&self, path: &str) -> String {
        site_url(&self.config.site.base_url, path)
    }

    /// Output directory of a tag page, relative to the site root.
    fn tag_dir(&self, tag: &str) -> String {
        let slug = self
            .tag_slugs
            .get(tag)
            .cloned()
            .unwrap_or_else(|| slugify(tag));
        format!("tags/{}", slug)
    }

    fn tag_href(&self, tag: &str) -> String {
        self.href(&format!("/{}/", self.tag_dir(tag)))
    }

    fn article_href(&self, article: &Article) -> String {
        self.href(&format!("/{}/", article.slug))
    }
}

fn write_article_page(
    site: &Site,
    article: &Article,
    output_dir: &Path,
) -> Result<GeneratedPage, GenerateError> {
    // Manifests can be edited by hand between stages
    if !is_url_safe(&article.slug) {
        return Err(GenerateError::UnsafeSlug(article.slug.clone()));
    }
    let dir = output_dir.join(&article.slug);
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join("index.html"),
        render_article_page(site, article).into_string(),
    )?;
    Ok(GeneratedPage {
        title: article.title.clone(),
        path: format!("{}/index.html", article.slug),
    })
}

fn write_tag_page(site: &Site, tag: &str, output_dir: &Path) -> Result<GeneratedPage, GenerateError> {
    let rel = site.tag_dir(tag);
    let dir: PathBuf = output_dir.join(&rel);
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("index.html"), render_tag_page(site, tag).into_string())?;
    Ok(GeneratedPage {
        title: tag.to_string(),
        path: format!("{}/index.html", rel),
    })
}

/// Assign each tag a unique URL slug.
///
/// Tags are case-sensitive but slugs are not, so `"CSS"` and `"css"` would
/// collide. Later tags in collection order get `-2`, `-3`, ... suffixes.
/// Tags with no slug-able characters become `tag`.
pub fn tag_slugs(index: &TagIndex) -> HashMap<String, String> {
    let mut used = HashSet::new();
    let mut slugs = HashMap::new();
    for entry in index.iter() {
        let base = match slugify(&entry.tag) {
            s if s.is_empty() => "tag".to_string(),
            s => s,
        };
        let mut slug = base.clone();
        let mut n = 2;
        while !used.insert(slug.clone()) {
            slug = format!("{base}-{n}");
            n += 1;
        }
        slugs.insert(entry.tag.clone(), slug);
    }
    slugs
}

// ============================================================================
// Data files
// ============================================================================

/// Entry of `posts.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub url: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reading_time: u32,
    pub tags: Vec<String>,
    pub featured: bool,
}

/// Article summaries sorted newest first. Ties keep collection order.
pub fn post_summaries(articles: &[Article], base_url: &str) -> Vec<PostSummary> {
    let mut posts: Vec<PostSummary> = articles
        .iter()
        .map(|a| PostSummary {
            slug: a.slug.clone(),
            url: site_url(base_url, &format!("/{}/", a.slug)),
            title: a.title.clone(),
            excerpt: a.excerpt.clone(),
            author: a.author.name.clone(),
            published_at: a.published_at,
            updated_at: a.updated_at,
            reading_time: a.reading_time,
            tags: a.tags.clone(),
            featured: a.featured,
        })
        .collect();
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    posts
}

/// Entry of `search-index.json`. Carries exactly the fields text search
/// looks at.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub tags: Vec<String>,
    pub body: String,
    pub featured: bool,
}

pub fn search_entries(articles: &[Article]) -> Vec<SearchEntry> {
    articles
        .iter()
        .map(|a| SearchEntry {
            slug: a.slug.clone(),
            title: a.title.clone(),
            excerpt: a.excerpt.clone(),
            author: a.author.name.clone(),
            tags: a.tags.clone(),
            body: a.body_text(),
            featured: a.featured,
        })
        .collect()
}

/// Join `path` onto the configured base URL, or leave it root-relative.
fn site_url(base_url: &str, path: &str) -> String {
    if base_url.is_empty() {
        path.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    description: &str,
    css: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the site header with title and tagline
fn site_header(site: &Site) -> Markup {
    let config = site.config;
    html! {
        header.site-header {
            a.site-title href=(site.href("/")) { (config.site.title) }
            @if !config.site.description.is_empty() {
                p.site-description { (config.site.description) }
            }
        }
    }
}

fn tag_links(site: &Site, tags: &[String]) -> Markup {
    html! {
        ul.tag-list {
            @for tag in tags {
                li { a.tag href=(site.tag_href(tag)) { (tag) } }
            }
        }
    }
}

/// Renders an article summary card
fn article_card(site: &Site, article: &Article) -> Markup {
    html! {
        article.card
            data-slug=(article.slug)
            data-featured=(if article.featured { "true" } else { "false" }) {
            @if !article.cover_image.is_empty() {
                a.card-cover href=(site.article_href(article)) {
                    img src=(article.cover_image) alt=(article.title) loading="lazy";
                }
            }
            div.card-body {
                div.card-meta {
                    time datetime=(article.published_at.to_rfc3339()) {
                        (format_date(&article.published_at))
                    }
                    span.reading-time { (article.reading_time) " min read" }
                    @if article.featured {
                        span.featured-badge { "Featured" }
                    }
                }
                h3.card-title {
                    a href=(site.article_href(article)) { (article.title) }
                }
                p.card-excerpt { (article.excerpt) }
                (tag_links(site, &article.tags))
                p.card-author { (article.author.name) }
            }
        }
    }
}

fn author_card(author: &Author) -> Markup {
    let links = author.social_links.entries();
    html! {
        aside.author-card {
            @if !author.avatar.is_empty() {
                img.avatar src=(author.avatar) alt=(author.name) loading="lazy";
            }
            div {
                h3 { "About " (author.name) }
                @if !author.bio.is_empty() {
                    p.author-bio { (author.bio) }
                }
                @if !links.is_empty() {
                    ul.social-links {
                        @for (label, href) in &links {
                            li { a href=(href) target="_blank" rel="noopener" { (label) } }
                        }
                    }
                }
            }
        }
    }
}

/// Font scale for a tag cloud entry, from 0.85em to 1.5em.
fn cloud_scale(count: usize, max_count: usize) -> f64 {
    if max_count == 0 {
        return 1.0;
    }
    0.85 + 0.65 * (count as f64 / max_count as f64)
}

fn tag_cloud(site: &Site) -> Markup {
    html! {
        div.tag-cloud role="group" aria-label="Filter by tag" {
            @for entry in &site.cloud {
                button.tag-chip
                    type="button"
                    data-tag=(entry.tag)
                    aria-pressed="false"
                    style={ "font-size: " (format!("{:.2}", cloud_scale(entry.count, site.max_count))) "em" } {
                    (entry.tag)
                    span.tag-count { (entry.count) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page.
///
/// Featured articles get their own section; the list below holds the rest.
/// When the reader filters, the script hides the featured section and shows
/// every matching card in the list, in collection order.
fn render_index(site: &Site) -> Markup {
    let articles = &site.manifest.articles;
    let (featured, _) = search::split_featured(articles);

    let content = html! {
        (site_header(site))
        main.index-page data-search-index=(site.href(&format!("/{}", SEARCH_INDEX_FILE))) {
            section.search-panel {
                input #search type="search" placeholder="Search articles..." aria-label="Search articles";
                (tag_cloud(site))
                button #clear-filters type="button" hidden { "Clear filters" }
                p #result-count .result-count hidden {}
            }
            @if !featured.is_empty() {
                section #featured .featured {
                    h2 { "Featured" }
                    div.card-grid {
                        @for article in &featured {
                            (article_card(site, article))
                        }
                    }
                }
            }
            section.latest {
                h2 { "Latest Articles" }
                div #article-list .card-grid {
                    @for article in articles {
                        @if article.featured {
                            div.card-slot data-slug=(article.slug) data-featured="true" hidden {
                                (article_card(site, article))
                            }
                        } @else {
                            div.card-slot data-slug=(article.slug) data-featured="false" {
                                (article_card(site, article))
                            }
                        }
                    }
                }
                p #no-results .no-results hidden { "No articles match your search." }
            }
        }
    };

    base_document(
        &site.config.site.title,
        &site.config.site.description,
        &site.css,
        Some("index"),
        content,
    )
}

/// Renders an article page
fn render_article_page(site: &Site, article: &Article) -> Markup {
    let toc = toc::extract_toc(article);
    let words = article.word_count();
    let reading = &site.config.reading;
    let start = ReadingProgress::start(words, reading.words_per_minute);

    let content = html! {
        div #reading-progress .progress-bar role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow="0" {
            div.progress-fill {}
        }
        div #progress-indicator .progress-indicator hidden {
            span.progress-label { (start.label()) }
        }
        (site_header(site))
        main.article-page
            data-words=(words)
            data-wpm=(reading.words_per_minute)
            data-toc-margin=(reading.toc_top_margin) {
            article.article {
                header.article-header {
                    @if !article.cover_image.is_empty() {
                        img.cover src=(article.cover_image) alt=(article.title);
                    }
                    (tag_links(site, &article.tags))
                    h1 { (article.title) }
                    p.excerpt { (article.excerpt) }
                    div.article-meta {
                        span.byline { (article.author.name) }
                        time datetime=(article.published_at.to_rfc3339()) {
                            "Published " (format_date(&article.published_at))
                        }
                        @if article.was_updated() {
                            time datetime=(article.updated_at.to_rfc3339()) {
                                "Updated " (format_date(&article.updated_at))
                            }
                        }
                        span.reading-time { (article.reading_time) " min read" }
                    }
                }
                div.article-layout {
                    @if !toc.is_empty() {
                        nav.toc aria-label="Table of contents" {
                            h2 { "Contents" }
                            ol {
                                @for entry in &toc {
                                    li class={ "toc-entry indent-" (indent_level(entry.level)) } {
                                        a href={ "#" (entry.id) } data-target=(entry.id) { (entry.title) }
                                    }
                                }
                            }
                        }
                    }
                    div.article-body {
                        (render::render_body(&article.content, site.highlighter))
                    }
                }
                (author_card(&article.author))
            }
            nav.article-nav {
                a href=(site.href("/")) { "← Back to articles" }
            }
        }
    };

    let title = format!("{} | {}", article.title, site.config.site.title);
    base_document(&title, &article.excerpt, &site.css, Some("article"), content)
}

/// Renders a tag page listing every article with the tag
fn render_tag_page(site: &Site, tag: &str) -> Markup {
    let selected = [tag.to_string()];
    let articles = search::filter(&site.manifest.articles, "", &selected);

    let content = html! {
        (site_header(site))
        main.tag-page {
            header.tag-header {
                a href=(site.href("/tags/")) { "All tags" }
                h1 { "Tagged: " (tag) }
                p.result-count {
                    (articles.len()) @if articles.len() == 1 { " article" } @else { " articles" }
                }
            }
            div.card-grid {
                @for article in &articles {
                    (article_card(site, article))
                }
            }
        }
    };

    let title = format!("{} | {}", tag, site.config.site.title);
    base_document(&title, &site.config.site.description, &site.css, Some("tag"), content)
}

/// Renders the overview of all tags
fn render_tags_overview(site: &Site) -> Markup {
    let content = html! {
        (site_header(site))
        main.tags-overview {
            h1 { "Tags" }
            ul.tag-overview-list {
                @for entry in &site.cloud {
                    li {
                        a.tag href=(site.tag_href(&entry.tag)) { (entry.tag) }
                        " "
                        span.tag-count { (entry.count) }
                    }
                }
            }
        }
    };

    let title = format!("Tags | {}", site.config.site.title);
    base_document(&title, &site.config.site.description, &site.css, Some("tags"), content)
}
