use crate::analyzer::analyze;
use crate::persist::{load_index_header, load_postings_for_term, IndexPaths};
use crate::writer::{idf, tf_weight};
use crate::{DocId, DocMeta, Posting, TermId};
use anyhow::Result;
use parking_lot::Mutex;
use recap_core::Hit;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

/// Read side of a committed index. Posting lists are loaded on first use and cached.
pub struct IndexReader {
    paths: IndexPaths,
    pub(crate) dictionary: HashMap<String, TermId>,
    pub(crate) df: Vec<u32>,
    pub(crate) docs: HashMap<DocId, DocMeta>,
    pub(crate) num_docs: u32,
    smoothed_idf: bool,
    cache: Mutex<HashMap<TermId, Arc<Vec<Posting>>>>,
}

impl IndexReader {
    pub fn from_parts(
        paths: IndexPaths,
        dictionary: HashMap<String, TermId>,
        df: Vec<u32>,
        docs: HashMap<DocId, DocMeta>,
        num_docs: u32,
        smoothed_idf: bool,
    ) -> Self {
        Self { paths, dictionary, df, docs, num_docs, smoothed_idf, cache: Mutex::new(HashMap::new()) }
    }

    /// Loads the header; the IDF variant comes from `meta.json`.
    pub fn load(paths: IndexPaths) -> Result<Self> {
        let ((dictionary, df), docs, meta) = load_index_header(&paths)?;
        Ok(Self::from_parts(paths, dictionary, df, docs, meta.num_docs, meta.smoothed_idf))
    }

    pub fn smoothed_idf(&self) -> bool {
        self.smoothed_idf
    }

    pub fn num_docs(&self) -> u32 {
        self.num_docs
    }

    pub(crate) fn postings(&self, term_id: TermId) -> Result<Arc<Vec<Posting>>> {
        if let Some(hit) = self.cache.lock().get(&term_id) {
            return Ok(Arc::clone(hit));
        }
        let loaded = Arc::new(load_postings_for_term(&self.paths, term_id)?);
        self.cache.lock().insert(term_id, Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Match query: terms are OR-ed and documents scored by cosine similarity.
    /// Returns the total number of matching documents and the top `limit` hits.
    pub fn search(&self, text: &str, limit: usize) -> Result<(usize, Vec<Hit>)> {
        let mut tf_q_raw: HashMap<TermId, u32> = HashMap::new();
        for term in analyze(text) {
            if let Some(&tid) = self.dictionary.get(&term) {
                *tf_q_raw.entry(tid).or_insert(0) += 1;
            }
        }
        if tf_q_raw.is_empty() {
            tracing::debug!(query = text, "no indexed terms in query");
            return Ok((0, Vec::new()));
        }

        let mut q_weights: HashMap<TermId, f32> = tf_q_raw
            .iter()
            .map(|(&tid, &tf)| {
                let df_t = self.df.get(tid as usize).copied().unwrap_or(1);
                (tid, tf_weight(tf) * idf(self.num_docs, df_t, self.smoothed_idf))
            })
            .collect();
        let mut norm = q_weights.values().map(|w| w * w).sum::<f32>().sqrt();
        if norm == 0.0 { norm = 1.0; }
        for w in q_weights.values_mut() { *w /= norm; }

        let mut scores: HashMap<DocId, f32> = HashMap::new();
        for (&tid, &q_w) in &q_weights {
            for p in self.postings(tid)?.iter() {
                *scores.entry(p.doc_id).or_insert(0.0) += p.weight * q_w;
            }
        }

        let mut scored: Vec<Hit> = scores
            .into_iter()
            .filter_map(|(doc_id, score)| {
                self.docs.get(&doc_id).map(|meta| Hit { id: meta.external_id.clone(), score })
            })
            .collect();
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal).then_with(|| a.id.cmp(&b.id)));
        let total_hits = scored.len();
        scored.truncate(limit);
        tracing::debug!(query = text, total_hits, returned = scored.len(), "search complete");
        Ok((total_hits, scored))
    }
}
