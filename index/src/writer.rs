use crate::analyzer::term_frequencies;
use crate::persist::{reset_postings, save_dictionary, save_docs, save_meta, save_postings_for_term, IndexPaths, MetaFile, FORMAT_VERSION};
use crate::{DocId, DocMeta, Posting, TermId};
use anyhow::Result;
use std::collections::{BTreeMap, HashMap};

/// Weighting knobs applied at commit time.
#[derive(Debug, Clone, Copy)]
pub struct IndexOptions {
    /// `ln(1 + N/df)` instead of `ln(N/df)`. The plain form zeroes out terms present in
    /// every document, which for a one-post corpus is every term.
    pub smoothed_idf: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self { smoothed_idf: true }
    }
}

pub(crate) fn idf(num_docs: u32, df: u32, smoothed: bool) -> f32 {
    let ratio = num_docs.max(1) as f32 / df.max(1) as f32;
    if smoothed { (1.0 + ratio).ln() } else { ratio.ln() }
}

pub(crate) fn tf_weight(tf: u32) -> f32 {
    if tf > 0 { 1.0 + (tf as f32).ln() } else { 0.0 }
}

struct PendingDoc {
    meta: DocMeta,
    tf: HashMap<String, u32>,
}

/// In-memory accumulator. Nothing touches disk until `commit`.
#[derive(Default)]
pub struct IndexWriter {
    docs: Vec<PendingDoc>,
    ids: HashMap<String, DocId>,
    options: IndexOptions,
}

impl IndexWriter {
    pub fn new(options: IndexOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    /// Re-adding an id keeps its doc id and replaces its terms.
    pub fn add(&mut self, id: &str, title: &str, description: &str) {
        let tf = term_frequencies([title, description]);
        self.put(DocMeta { external_id: id.to_string(), title: title.to_string() }, tf);
    }

    pub(crate) fn put(&mut self, meta: DocMeta, tf: HashMap<String, u32>) {
        match self.ids.get(&meta.external_id) {
            Some(&doc_id) => self.docs[doc_id as usize] = PendingDoc { meta, tf },
            None => {
                let doc_id = self.docs.len() as DocId;
                self.ids.insert(meta.external_id.clone(), doc_id);
                self.docs.push(PendingDoc { meta, tf });
            }
        }
    }

    /// Assigns term ids, computes L2-normalized TF-IDF weights and writes every segment file.
    /// Returns the header a reader needs.
    pub fn commit(&self, paths: &IndexPaths) -> Result<(HashMap<String, TermId>, Vec<u32>, HashMap<DocId, DocMeta>, u32)> {
        let num_docs = self.docs.len() as u32;

        // Term ids in lexical order keep rebuilt indexes byte-for-byte stable.
        let mut postings_raw: BTreeMap<&str, Vec<(DocId, u32)>> = BTreeMap::new();
        for (doc_id, doc) in self.docs.iter().enumerate() {
            for (term, &tf) in &doc.tf {
                postings_raw.entry(term.as_str()).or_default().push((doc_id as DocId, tf));
            }
        }

        let mut dictionary: HashMap<String, TermId> = HashMap::with_capacity(postings_raw.len());
        let mut df: Vec<u32> = Vec::with_capacity(postings_raw.len());
        let mut doc_norms: Vec<f32> = vec![0.0; num_docs as usize];
        for (term_id, (term, plist)) in postings_raw.iter().enumerate() {
            dictionary.insert(term.to_string(), term_id as TermId);
            df.push(plist.len() as u32);
            let idf = idf(num_docs, plist.len() as u32, self.options.smoothed_idf);
            for &(doc_id, tf) in plist {
                let w = tf_weight(tf) * idf;
                doc_norms[doc_id as usize] += w * w;
            }
        }
        for dn in doc_norms.iter_mut() {
            *dn = dn.sqrt();
            if *dn == 0.0 { *dn = 1.0; }
        }

        reset_postings(paths)?;
        for (term_id, plist) in postings_raw.values().enumerate() {
            let idf = idf(num_docs, plist.len() as u32, self.options.smoothed_idf);
            let mut out: Vec<Posting> = plist
                .iter()
                .map(|&(doc_id, tf)| Posting { doc_id, tf, weight: tf_weight(tf) * idf / doc_norms[doc_id as usize] })
                .collect();
            out.sort_by_key(|p| p.doc_id);
            save_postings_for_term(paths, term_id as TermId, &out)?;
        }

        let docs: HashMap<DocId, DocMeta> = self
            .docs
            .iter()
            .enumerate()
            .map(|(doc_id, doc)| (doc_id as DocId, doc.meta.clone()))
            .collect();
        save_dictionary(paths, &(dictionary.clone(), df.clone()))?;
        save_docs(paths, &docs)?;
        let meta = MetaFile {
            num_docs,
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            version: FORMAT_VERSION,
            smoothed_idf: self.options.smoothed_idf,
        };
        save_meta(paths, &meta)?;
        tracing::info!(num_docs, num_terms = dictionary.len(), root = %paths.root.display(), "index commit complete");
        Ok((dictionary, df, docs, num_docs))
    }
}
