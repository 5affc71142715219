//! TF-IDF inverted index persisted as a directory of bincode segments.
//!
//! [`TfIdfIndex`] is the production [`IndexStore`]: documents are buffered by
//! [`writer::IndexWriter`], written on commit, and served by [`searcher::IndexReader`].

pub mod analyzer;
pub mod persist;
pub mod searcher;
pub mod writer;

use recap_core::{IndexStore, RecapError, Result, SearchResults};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Instant;

use persist::IndexPaths;
use searcher::IndexReader;
use writer::{IndexOptions, IndexWriter};

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMeta {
    /// Identifier given to `add`; for posts, the title.
    pub external_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Raw term frequency, kept so an opened index can be extended and recommitted.
    pub tf: u32,
    /// L2-normalized TF-IDF weight.
    pub weight: f32,
}

pub struct TfIdfIndex {
    paths: IndexPaths,
    options: IndexOptions,
    writer: Option<IndexWriter>,
    reader: Option<IndexReader>,
}

impl TfIdfIndex {
    pub fn with_options(path: &Path, options: IndexOptions) -> Result<Self> {
        let create_err = |reason: String| RecapError::IndexCreate { path: path.to_path_buf(), reason };
        if path.exists() {
            let empty_dir = path.is_dir()
                && fs::read_dir(path).map_err(|e| create_err(e.to_string()))?.next().is_none();
            if !empty_dir {
                return Err(create_err("path already exists; remove it to rebuild".into()));
            }
        }
        fs::create_dir_all(path).map_err(|e| create_err(e.to_string()))?;
        Ok(Self { paths: IndexPaths::new(path), options, writer: Some(IndexWriter::new(options)), reader: None })
    }

    pub fn num_docs(&self) -> usize {
        match (&self.writer, &self.reader) {
            (Some(w), _) => w.num_docs(),
            (None, Some(r)) => r.num_docs() as usize,
            (None, None) => 0,
        }
    }

    /// Rebuilds a writer from committed postings so that `add` works on an opened index.
    fn writer_from_reader(&self, reader: &IndexReader) -> anyhow::Result<IndexWriter> {
        let mut tfs: HashMap<DocId, HashMap<String, u32>> = HashMap::new();
        for (term, &tid) in &reader.dictionary {
            for p in reader.postings(tid)?.iter() {
                tfs.entry(p.doc_id).or_default().insert(term.clone(), p.tf);
            }
        }
        let mut doc_ids: Vec<&DocId> = reader.docs.keys().collect();
        doc_ids.sort();
        let mut writer = IndexWriter::new(self.options);
        for doc_id in doc_ids {
            writer.put(reader.docs[doc_id].clone(), tfs.remove(doc_id).unwrap_or_default());
        }
        Ok(writer)
    }
}

impl IndexStore for TfIdfIndex {
    fn build(path: &Path) -> Result<Self> {
        Self::with_options(path, IndexOptions::default())
    }

    fn open(path: &Path) -> Result<Self> {
        let paths = IndexPaths::new(path);
        if !paths.meta().is_file() {
            return Err(RecapError::IndexNotFound { path: path.to_path_buf() });
        }
        let reader = IndexReader::load(paths.clone())
            .map_err(|e| RecapError::IndexOpen { path: path.to_path_buf(), reason: format!("{e:#}") })?;
        let options = IndexOptions { smoothed_idf: reader.smoothed_idf() };
        Ok(Self { paths, options, writer: None, reader: Some(reader) })
    }

    fn add(&mut self, id: &str, title: &str, description: &str) -> Result<()> {
        if id.is_empty() {
            return Err(RecapError::index_add(id, "empty document id"));
        }
        if self.writer.is_none() {
            let reader = self.reader.as_ref().ok_or_else(|| RecapError::index_add(id, "index is closed"))?;
            let writer = self.writer_from_reader(reader).map_err(|e| RecapError::index_add(id, format!("{e:#}")))?;
            self.writer = Some(writer);
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.add(id, title, description);
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let Some(writer) = self.writer.as_ref() else { return Ok(()) };
        // The buffered documents stay in place until the segments are fully written,
        // so a failed commit can be retried.
        let (dictionary, df, docs, num_docs) = writer.commit(&self.paths).map_err(|e| RecapError::IndexCreate {
            path: self.paths.root.clone(),
            reason: format!("{e:#}"),
        })?;
        self.writer = None;
        self.reader = Some(IndexReader::from_parts(self.paths.clone(), dictionary, df, docs, num_docs, self.options.smoothed_idf));
        Ok(())
    }

    fn query(&self, text: &str, limit: usize) -> Result<SearchResults> {
        if limit == 0 {
            return Err(RecapError::query(text, "result limit must be positive"));
        }
        let reader = self
            .reader
            .as_ref()
            .ok_or_else(|| RecapError::query(text, "index has uncommitted documents"))?;
        let start = Instant::now();
        let (total_hits, hits) = reader.search(text, limit).map_err(|e| RecapError::query(text, format!("{e:#}")))?;
        Ok(SearchResults { query: text.to_string(), total_hits, hits, took: start.elapsed() })
    }
}
