pub mod error;
pub mod frequency;
pub mod gateway;
pub mod layout;
pub mod normalize;
pub mod parser;
pub mod persist;
pub mod pipeline;
pub mod render;

pub use error::{RecapError, Result};
pub use frequency::{term_counts, Frequencies, Inclusion, TermCounts};
pub use gateway::{Hit, IndexStore, SearchResults, CLOUD_LIMIT, SEARCH_LIMIT};
pub use layout::Layout;
pub use render::{CloudConfig, CloudRenderer, PaletteGenerator, Rgb};

use serde::{Deserialize, Serialize};
use time::macros::datetime;
use time::OffsetDateTime;

/// Date assigned to posts whose "Posted On" line could not be parsed.
pub const ZERO_DATE: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

/// One announcement: a title line, a "Posted On" date line and a description line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(with = "time::serde::rfc3339", default = "zero_date")]
    pub date: OffsetDateTime,
    #[serde(rename = "desc", default)]
    pub description: String,
}

impl Post {
    /// Posts with an empty title are trailing sentinels and never reach the store or the index.
    pub fn is_indexable(&self) -> bool {
        !self.title.is_empty()
    }
}

impl Default for Post {
    fn default() -> Self {
        Self { title: String::new(), date: ZERO_DATE, description: String::new() }
    }
}

fn zero_date() -> OffsetDateTime {
    ZERO_DATE
}
