use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecapError>;

/// Everything that can go wrong between reading the raw corpus and writing the cloud image.
///
/// `Parse` and `IndexAdd` are recovered where they happen (logged, batch continues);
/// the rest end the running command.
#[derive(Error, Debug)]
pub enum RecapError {
    #[error("failed to parse date {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: time::error::Parse,
    },

    #[error("post store {} not found (have you run 'build' yet?)", path.display())]
    CorpusNotIndexed { path: PathBuf },

    #[error("search index {} not found (have you run 'build' yet?)", path.display())]
    IndexNotFound { path: PathBuf },

    #[error("failed to create index at {}: {reason}", path.display())]
    IndexCreate { path: PathBuf, reason: String },

    #[error("failed to open index at {}: {reason}", path.display())]
    IndexOpen { path: PathBuf, reason: String },

    #[error("failed to index document {id:?}: {reason}")]
    IndexAdd { id: String, reason: String },

    #[error("failed to search index for {query:?}: {reason}")]
    Query { query: String, reason: String },

    #[error("failed to render word cloud: {0}")]
    Render(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl RecapError {
    pub fn query(query: &str, reason: impl ToString) -> Self {
        RecapError::Query { query: query.to_string(), reason: reason.to_string() }
    }

    pub fn index_add(id: &str, reason: impl ToString) -> Self {
        RecapError::IndexAdd { id: id.to_string(), reason: reason.to_string() }
    }

    pub fn render(reason: impl ToString) -> Self {
        RecapError::Render(reason.to_string())
    }
}
