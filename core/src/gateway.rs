//! Boundary to the full-text index.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::{Post, Result};

/// Result cap for `search`: a short, high-precision list.
pub const SEARCH_LIMIT: usize = 50;
/// Result cap for the cloud filter: a broader sample for frequency signal.
pub const CLOUD_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Document identifier, which is the post title.
    pub id: String,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct SearchResults {
    pub query: String,
    /// Matching documents before the limit was applied.
    pub total_hits: usize,
    /// Ranked hits, at most `limit` of them.
    pub hits: Vec<Hit>,
    pub took: Duration,
}

impl fmt::Display for SearchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits.is_empty() {
            return write!(f, "No matches");
        }
        writeln!(
            f,
            "{} matches, showing 1 through {}, took {:?}",
            self.total_hits,
            self.hits.len(),
            self.took
        )?;
        for (i, hit) in self.hits.iter().enumerate() {
            writeln!(f, "{:5}. {} ({:.6})", i + 1, hit.id, hit.score)?;
        }
        Ok(())
    }
}

/// Full-text store holding one document per post, keyed by title.
pub trait IndexStore {
    /// Creates a new empty index. Fails if `path` already holds something.
    fn build(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Opens an index created by `build`.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Inserts or replaces the document `id`.
    fn add(&mut self, id: &str, title: &str, description: &str) -> Result<()>;

    /// Makes everything added so far durable and searchable.
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    /// Match query: returns at most `limit` hits in relevance order.
    fn query(&self, text: &str, limit: usize) -> Result<SearchResults>;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BulkLoadReport {
    pub indexed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Adds every post with a title, then commits. A failing document is logged and skipped.
pub fn bulk_load<S: IndexStore>(store: &mut S, posts: &[Post]) -> Result<BulkLoadReport> {
    let mut report = BulkLoadReport::default();
    for post in posts {
        if !post.is_indexable() {
            report.skipped += 1;
            continue;
        }
        match store.add(&post.title, &post.title, &post.description) {
            Ok(()) => report.indexed += 1,
            Err(err) => {
                warn!(title = %post.title, %err, "error indexing post");
                report.failed += 1;
            }
        }
    }
    store.commit()?;
    info!(indexed = report.indexed, failed = report.failed, skipped = report.skipped, "bulk load complete");
    Ok(report)
}
