//! CLI output formatting for pipeline stages and queries.
//!
//! # Information-First Display
//!
//! Output leads with what an entity *is* (positional index and title), with
//! slugs, paths and counts as indented context lines. The output reads as a
//! content inventory while still pointing back at files and URLs.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Articles
//! 001 Modern CSS Techniques for Beautiful UI Design (6 min, featured)
//!     Slug: modern-css-beautiful-ui-design
//!     Author: Sarah Johnson
//!     Tags: CSS, Design, UI/UX
//!
//! Authors
//! 001 Sarah Johnson (1 article)
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 Modern CSS Techniques for Beautiful UI Design → modern-css-beautiful-ui-design/index.html
//!
//! Tags
//! 001 React (2) → tags/react/index.html
//!
//! Data
//!     posts.json
//!     search-index.json
//!
//! Generated 4 articles, 12 tag pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::progress::ReadingProgress;
use crate::scan::Manifest;
use crate::search::TagCount;
use crate::toc::indent_level;
use crate::types::{Article, TocEntry};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Header line plus context lines for one article.
fn article_lines(index: usize, article: &Article) -> Vec<String> {
    let mut detail = format!("{} min", article.reading_time);
    if article.featured {
        detail.push_str(", featured");
    }
    let mut lines = vec![format!(
        "{} {} ({})",
        format_index(index),
        article.title,
        detail
    )];
    lines.push(format!("{}Slug: {}", indent(1), article.slug));
    lines.push(format!("{}Author: {}", indent(1), article.author.name));
    if !article.tags.is_empty() {
        lines.push(format!("{}Tags: {}", indent(1), article.tags.join(", ")));
    }
    lines
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: articles in collection order, authors, config.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];
    if manifest.articles.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, article) in manifest.articles.iter().enumerate() {
        lines.extend(article_lines(i + 1, article));
    }

    if !manifest.authors.is_empty() {
        lines.push(String::new());
        lines.push("Authors".to_string());
        for (i, author) in manifest.authors.iter().enumerate() {
            let written = manifest
                .articles
                .iter()
                .filter(|a| a.author.id == author.id)
                .count();
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                author.name,
                plural(written, "article", "articles")
            ));
        }
    }

    if source_root.join("config.toml").exists() {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.push(format!("{}config.toml", indent(1)));
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: every written page and data file.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];
    for (i, page) in report.articles.iter().enumerate() {
        lines.push(format!("{} {} → {}", format_index(i + 1), page.title, page.path));
    }

    if !report.tags.is_empty() {
        lines.push(String::new());
        lines.push("Tags".to_string());
        for (i, (page, count)) in report.tags.iter().enumerate() {
            lines.push(format!(
                "{} {} ({}) → {}",
                format_index(i + 1),
                page.title,
                count,
                page.path
            ));
        }
    }

    if !report.data_files.is_empty() {
        lines.push(String::new());
        lines.push("Data".to_string());
        for file in &report.data_files {
            lines.push(format!("{}{}", indent(1), file));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(report.articles.len(), "article", "articles"),
        plural(report.tags.len(), "tag page", "tag pages")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Format search results with the query that produced them.
pub fn format_search_results(results: &[&Article], query: &str, tags: &[String]) -> Vec<String> {
    let mut header = "Search".to_string();
    if !query.is_empty() {
        header.push_str(&format!(" \"{}\"", query));
    }
    if !tags.is_empty() {
        header.push_str(&format!(" [{}]", tags.join(", ")));
    }
    let mut lines = vec![header];

    if results.is_empty() {
        lines.push("No articles match your search.".to_string());
        return lines;
    }
    for (i, article) in results.iter().enumerate() {
        lines.extend(article_lines(i + 1, article));
    }
    lines.push(format!(
        "{} found",
        plural(results.len(), "article", "articles")
    ));
    lines
}

pub fn print_search_results(results: &[&Article], query: &str, tags: &[String]) {
    for line in format_search_results(results, query, tags) {
        println!("{}", line);
    }
}

/// Format tag counts, counts right-aligned.
pub fn format_tag_index(entries: &[TagCount]) -> Vec<String> {
    let width = entries
        .iter()
        .map(|e| e.count.to_string().len())
        .max()
        .unwrap_or(1);
    entries
        .iter()
        .map(|e| format!("{:>width$} {}", e.count, e.tag, width = width))
        .collect()
}

pub fn print_tag_index(entries: &[TagCount]) {
    for line in format_tag_index(entries) {
        println!("{}", line);
    }
}

/// Format a table of contents, indented by heading level.
pub fn format_toc(article: &Article, toc: &[TocEntry]) -> Vec<String> {
    let mut lines = vec![article.title.clone()];
    if toc.is_empty() {
        lines.push(format!("{}(no headings)", indent(1)));
    }
    for entry in toc {
        let depth = 1 + indent_level(entry.level) as usize;
        lines.push(format!("{}{} #{}", indent(depth), entry.title, entry.id));
    }
    lines
}

pub fn print_toc(article: &Article, toc: &[TocEntry]) {
    for line in format_toc(article, toc) {
        println!("{}", line);
    }
}

/// Format a reading progress snapshot.
pub fn format_progress(article: &Article, progress: &ReadingProgress) -> Vec<String> {
    vec![
        article.title.clone(),
        format!("{}Progress: {:.1}%", indent(1), progress.progress),
        format!(
            "{}Words read: {} / {}",
            indent(1),
            progress.words_read,
            progress.total_words
        ),
        format!("{}Time left: {}", indent(1), progress.label()),
    ]
}

pub fn print_progress(article: &Article, progress: &ReadingProgress) {
    for line in format_progress(article, progress) {
        println!("{}", line);
    }
}
