//! Search and tag filtering over the article collection.
//!
//! All functions here are pure over a borrowed, read-only collection and
//! return derived views; the source slice is never reordered or mutated.
//!
//! ## Matching Rules
//!
//! | Stage | Empty input | Non-empty input |
//! |-------|-------------|-----------------|
//! | Text query | everything passes | lowercased substring of title, excerpt, body, author name, or any tag |
//! | Selected tags | everything passes | article carries **every** selected tag, exact case-sensitive match |
//!
//! The text stage folds case; the tag stage does not. Tags are opaque
//! canonical labels, so `"React"` and `"react"` are different tags.
//!
//! Both stages run over the same input and results keep input order.

use crate::types::Article;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Does `article` match a free-text query?
///
/// `needle` must already be lowercased.
fn matches_text(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article.excerpt.to_lowercase().contains(needle)
        || article.author.name.to_lowercase().contains(needle)
        || article
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
        || article.body_text().to_lowercase().contains(needle)
}

fn matches_tags(article: &Article, selected: &[String]) -> bool {
    selected.iter().all(|tag| article.tags.contains(tag))
}

/// Filter `articles` by free-text `query` and AND-ed `selected_tags`.
pub fn filter<'a>(articles: &'a [Article], query: &str, selected_tags: &[String]) -> Vec<&'a Article> {
    let needle = query.to_lowercase();
    articles
        .iter()
        .filter(|a| needle.is_empty() || matches_text(a, &needle))
        .filter(|a| selected_tags.is_empty() || matches_tags(a, selected_tags))
        .collect()
}

/// Look up an article by its routing slug.
pub fn find_by_slug<'a>(articles: &'a [Article], slug: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.slug == slug)
}

/// Split into `(featured, regular)`, each keeping input order.
pub fn split_featured<'a, I>(articles: I) -> (Vec<&'a Article>, Vec<&'a Article>)
where
    I: IntoIterator<Item = &'a Article>,
{
    articles.into_iter().partition(|a| a.featured)
}

/// How many articles use a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Sort policy for presenting a [`TagIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagOrder {
    /// First-seen order from the collection.
    #[default]
    Collection,
    Alphabetical,
    /// Most used first, ties alphabetical.
    Popularity,
    Shuffled,
}

/// Per-tag article counts, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagIndex {
    entries: Vec<TagCount>,
}

impl TagIndex {
    pub fn get(&self, tag: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.tag == tag).map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagCount> {
        self.entries.iter()
    }

    /// Highest count, used to scale the tag cloud.
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    /// Entries ordered by `order`. `Shuffled` uses the thread RNG.
    pub fn sorted(&self, order: TagOrder) -> Vec<TagCount> {
        self.sorted_with(order, &mut rand::thread_rng())
    }

    /// Like [`sorted`](Self::sorted) with a caller-supplied RNG.
    pub fn sorted_with<R: Rng + ?Sized>(&self, order: TagOrder, rng: &mut R) -> Vec<TagCount> {
        let mut entries = self.entries.clone();
        match order {
            TagOrder::Collection => {}
            TagOrder::Alphabetical => entries.sort_by(|a, b| a.tag.cmp(&b.tag)),
            TagOrder::Popularity => {
                entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)))
            }
            TagOrder::Shuffled => entries.shuffle(rng),
        }
        entries
    }
}

/// Count, for each tag, how many distinct articles carry it.
///
/// A tag repeated within one article counts once for that article.
pub fn aggregate_tags(articles: &[Article]) -> TagIndex {
    let mut entries: Vec<TagCount> = Vec::new();
    for article in articles {
        let mut seen = HashSet::new();
        for tag in &article.tags {
            if !seen.insert(tag.as_str()) {
                continue;
            }
            match entries.iter_mut().find(|e| &e.tag == tag) {
                Some(entry) => entry.count += 1,
                None => entries.push(TagCount {
                    tag: tag.clone(),
                    count: 1,
                }),
            }
        }
    }
    TagIndex { entries }
}

/// The set of tags a reader has selected, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `tag` if selected, otherwise append it.
    pub fn toggle(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }
}

impl<S: Into<String>> FromIterator<S> for TagSelection {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut selection = TagSelection::new();
        for tag in iter {
            let tag = tag.into();
            if !selection.contains(&tag) {
                selection.tags.push(tag);
            }
        }
        selection
    }
}

/// Ephemeral search state owned by one list view.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub tags: TagSelection,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.tags.toggle(tag);
    }

    /// Reset both the query and the tag selection.
    pub fn clear_all(&mut self) {
        self.query.clear();
        self.tags.clear();
    }

    /// Whether any filter is narrowing the list.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.tags.is_empty()
    }

    pub fn results<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        filter(articles, &self.query, self.tags.as_slice())
    }
}
