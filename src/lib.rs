//! # Simple Blog
//!
//! A minimal static blog generator. Articles are structured documents of
//! typed content blocks; the generated site offers free-text search, tag
//! filtering with a weighted tag cloud, a table of contents per article, and
//! a reading progress indicator.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (files → validated collection)
//! 2. Generate  manifest  →  dist/            (HTML pages + JSON data)
//! ```
//!
//! The manifest is human-readable JSON and the only thing the second stage
//! reads, so a broken page can be traced to either bad input or bad
//! rendering by inspecting one file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads authors and articles (JSON or markdown), validates, produces the manifest |
//! | [`generate`] | Stage 2: renders the home page, article pages, tag pages and JSON data with Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and color CSS generation |
//! | [`types`] | Domain types: `Article`, `Author`, `ContentBlock`, `TocEntry` |
//! | [`markdown`] | Markdown body → content blocks |
//! | [`render`] | Content block → HTML, with pluggable syntax highlighting |
//! | [`search`] | Text search, tag filtering, tag aggregation and cloud ordering |
//! | [`toc`] | Heading extraction, anchor slugs, active-section tracking |
//! | [`progress`] | Scroll position → reading progress and time left |
//! | [`naming`] | `NNN-slug` filename convention parser |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Blocks Over Raw HTML
//!
//! Article bodies are a sequence of typed blocks rather than an HTML string.
//! Headings stay addressable for the table of contents, code keeps its
//! language for highlighting, and search indexes plain text without
//! stripping markup. Markdown sources are converted to blocks at load time,
//! so every later stage sees one representation.
//!
//! ## Pure Core, Thin Browser Layer
//!
//! Filtering, tag aggregation, progress and active-section logic are pure
//! functions over borrowed data. The generated pages ship a small script
//! that applies the same rules in the browser; the Rust functions are the
//! reference the CLI (`search`, `tags`, `toc`, `progress`) exposes.
//!
//! ## Explicit Theme Mode
//!
//! Light, dark, or system-following colors are chosen in `config.toml` and
//! emitted as CSS custom properties. There is no runtime theme state.

pub mod config;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod progress;
pub mod render;
pub mod scan;
pub mod search;
pub mod toc;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
