//! Shared test utilities for the simple-blog test suite.
//!
//! Provides small block/article builders, a four-article sample collection,
//! fixture setup, and lookup helpers that panic with a clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let articles = sample_articles();
//! let article = find_article(&articles, "modern-css");
//! assert_eq!(article.author.name, "Sarah Johnson");
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//! ```

use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use tempfile::TempDir;

use crate::types::{
    Article, Author, BlockKind, CalloutTone, ContentBlock, ListStyle, SocialLinks,
};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Block builders: ids are derived from content
// =========================================================================

pub fn text(s: &str) -> ContentBlock {
    ContentBlock::new(format!("t-{s}"), BlockKind::Text(s.to_string()))
}

pub fn heading(level: u8, s: &str) -> ContentBlock {
    ContentBlock::new(
        format!("h-{s}"),
        BlockKind::Heading {
            level,
            text: s.to_string(),
        },
    )
}

pub fn code(language: &str, src: &str) -> ContentBlock {
    ContentBlock::new(
        format!("c-{language}"),
        BlockKind::Code {
            language: language.to_string(),
            code: src.to_string(),
        },
    )
}

// =========================================================================
// Article builders
// =========================================================================

fn date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 10, 0, 0).unwrap()
}

pub fn author(id: &str, name: &str) -> Author {
    Author {
        id: id.to_string(),
        name: name.to_string(),
        bio: "Writes about the web.".to_string(),
        avatar: format!("/avatars/{id}.jpg"),
        social_links: SocialLinks::default(),
    }
}

/// A minimal article with the given body and no tags.
pub fn article_with_blocks(content: Vec<ContentBlock>) -> Article {
    Article {
        id: "test".to_string(),
        title: "Test Article".to_string(),
        slug: "test-article".to_string(),
        excerpt: "An article used in tests.".to_string(),
        content,
        author: author("tester", "Test Author"),
        published_at: date(1),
        updated_at: date(1),
        reading_time: 1,
        tags: vec![],
        cover_image: String::new(),
        featured: false,
    }
}

/// A minimal article identified by `slug` carrying `tags` verbatim.
pub fn article_tagged(slug: &str, tags: &[&str]) -> Article {
    Article {
        id: slug.to_string(),
        slug: slug.to_string(),
        title: slug.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..article_with_blocks(vec![text("body")])
    }
}

/// Four articles: two featured, two tagged `React`, exactly one of which
/// mentions performance.
pub fn sample_articles() -> Vec<Article> {
    vec![
        Article {
            id: "1".to_string(),
            title: "Writing a Minimal x86 Bootloader".to_string(),
            slug: "minimal-bootloader".to_string(),
            excerpt: "Build a boot sector that prints messages and reads the disk.".to_string(),
            content: vec![
                heading(1, "Introduction"),
                text("The BIOS loads the boot sector to 0x7C00."),
                heading(2, "Reading Sectors"),
                text("Use INT 0x13 with AH=0x02 to read a sector."),
                code("nasm", "mov ah, 0x02\nint 0x13"),
            ],
            author: author("aayush", "Aayush Gid"),
            published_at: date(18),
            updated_at: date(23),
            reading_time: 15,
            tags: vec![
                "bootloader".to_string(),
                "assembly".to_string(),
                "x86".to_string(),
                "osdev".to_string(),
            ],
            cover_image: "/images/bootloader.png".to_string(),
            featured: true,
        },
        Article {
            id: "2".to_string(),
            title: "Modern CSS for Beautiful UI Design".to_string(),
            slug: "modern-css".to_string(),
            excerpt: "Layouts and color systems with modern CSS.".to_string(),
            content: vec![
                heading(2, "Grid Layouts"),
                text("Grid makes two-dimensional layout simple."),
                ContentBlock::new(
                    "c1",
                    BlockKind::Callout {
                        tone: CalloutTone::Info,
                        title: "Tip".to_string(),
                        message: "Use custom properties for themes.".to_string(),
                    },
                ),
            ],
            author: author("sarah", "Sarah Johnson"),
            published_at: date(12),
            updated_at: date(13),
            reading_time: 6,
            tags: vec!["CSS".to_string(), "Design".to_string(), "UI/UX".to_string()],
            cover_image: String::new(),
            featured: true,
        },
        Article {
            id: "3".to_string(),
            title: "React Performance Optimization Strategies".to_string(),
            slug: "react-performance".to_string(),
            excerpt: "Techniques for measuring and improving performance in React apps."
                .to_string(),
            content: vec![
                heading(2, "Memoization"),
                ContentBlock::new(
                    "l1",
                    BlockKind::List {
                        style: ListStyle::Unordered,
                        items: vec!["useMemo".to_string(), "useCallback".to_string()],
                    },
                ),
            ],
            author: author("mike", "Mike Chen"),
            published_at: date(10),
            updated_at: date(10),
            reading_time: 12,
            tags: vec![
                "React".to_string(),
                "Performance".to_string(),
                "JavaScript".to_string(),
            ],
            cover_image: String::new(),
            featured: false,
        },
        Article {
            id: "4".to_string(),
            title: "The Future of Web Development".to_string(),
            slug: "web-trends-2025".to_string(),
            excerpt: "Trends shaping how we build for the web.".to_string(),
            content: vec![
                heading(2, "Server Components"),
                text("Frameworks are moving rendering back to the server."),
            ],
            author: author("john", "John Smith"),
            published_at: date(8),
            updated_at: date(9),
            reading_time: 10,
            tags: vec![
                "Web Development".to_string(),
                "React".to_string(),
                "Trends".to_string(),
            ],
            cover_image: String::new(),
            featured: false,
        },
    ]
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find an article by slug. Panics if not found.
pub fn find_article<'a>(articles: &'a [Article], slug: &str) -> &'a Article {
    articles.iter().find(|a| a.slug == slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = articles.iter().map(|a| a.slug.as_str()).collect();
        panic!("article '{slug}' not found. Available: {slugs:?}")
    })
}

/// All slugs in collection order.
pub fn article_slugs(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.slug.as_str()).collect()
}
