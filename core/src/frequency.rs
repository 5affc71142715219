use std::collections::{HashMap, HashSet};

use crate::gateway::Hit;
use crate::normalize::tokens;
use crate::Post;

pub type TermCounts = HashMap<String, usize>;

/// Which posts feed the word cloud.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Inclusion {
    #[default]
    All,
    /// Only posts whose title is in the set.
    Subset(HashSet<String>),
}

impl Inclusion {
    pub fn from_hits<'a>(hits: impl IntoIterator<Item = &'a Hit>) -> Self {
        Inclusion::Subset(hits.into_iter().map(|hit| hit.id.clone()).collect())
    }

    pub fn includes(&self, title: &str) -> bool {
        match self {
            Inclusion::All => true,
            Inclusion::Subset(titles) => titles.contains(title),
        }
    }
}

#[derive(Debug, Default)]
pub struct Frequencies {
    pub counts: TermCounts,
    /// Number of posts that contributed.
    pub posts: usize,
}

/// Counts every surviving token of the title and description of each included post.
pub fn term_counts(posts: &[Post], inclusion: &Inclusion) -> Frequencies {
    let mut freq = Frequencies::default();
    for post in posts.iter().filter(|p| inclusion.includes(&p.title)) {
        for token in tokens(&post.title).chain(tokens(&post.description)) {
            *freq.counts.entry(token).or_insert(0) += 1;
        }
        freq.posts += 1;
    }
    freq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, description: &str) -> Post {
        Post { title: title.into(), description: description.into(), ..Post::default() }
    }

    #[test]
    fn counts_every_occurrence() {
        let posts = vec![post("Lambda adds Rust", "Lambda Rust runtime"), post("S3 tables", "Tables for lambda")];
        let freq = term_counts(&posts, &Inclusion::All);
        assert_eq!(freq.posts, 2);
        assert_eq!(freq.counts["lambda"], 3);
        assert_eq!(freq.counts["rust"], 2);
        assert_eq!(freq.counts["tables"], 2);
        assert!(!freq.counts.contains_key("for"));
    }

    #[test]
    fn subset_filters_by_title() {
        let posts = vec![post("Keep me", "alpha"), post("Skip me", "beta")];
        let inclusion = Inclusion::Subset(["Keep me".to_string()].into_iter().collect());
        let freq = term_counts(&posts, &inclusion);
        assert_eq!(freq.posts, 1);
        assert!(freq.counts.contains_key("alpha"));
        assert!(!freq.counts.contains_key("beta"));
    }

    #[test]
    fn all_includes_any_title() {
        assert!(Inclusion::All.includes(""));
        assert!(Inclusion::All.includes("anything"));
        assert!(!Inclusion::Subset(HashSet::new()).includes("anything"));
    }
}
