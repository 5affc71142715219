//! On-disk segment layout:
//!
//! ```text
//! recap.index/
//!   meta.json             doc count, creation time, format version, IDF variant
//!   dictionary.bin        term -> term id, plus document frequencies
//!   docs.bin              doc id -> DocMeta
//!   postings/NNNNNNNN.bin one posting list per term id
//! ```

use crate::{DocId, DocMeta, Posting, TermId};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
    /// IDF variant the weights were computed with; queries must use the same one.
    #[serde(default = "default_smoothed_idf")]
    pub smoothed_idf: bool,
}

fn default_smoothed_idf() -> bool {
    true
}

pub type Dictionary = (HashMap<String, TermId>, Vec<u32>);

#[derive(Debug, Clone)]
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
    fn dictionary(&self) -> PathBuf { self.root.join("dictionary.bin") }
    fn docs(&self) -> PathBuf { self.root.join("docs.bin") }
    fn postings_dir(&self) -> PathBuf { self.root.join("postings") }
    fn postings(&self, term_id: TermId) -> PathBuf { self.postings_dir().join(format!("{term_id:08}.bin")) }
}

fn write_bincode<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut w = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?);
    bincode::serialize_into(&mut w, value)?;
    w.flush()?;
    Ok(())
}

fn read_bincode<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let value = bincode::deserialize_from(BufReader::new(f)).with_context(|| format!("decoding {}", path.display()))?;
    Ok(value)
}

pub fn save_dictionary(paths: &IndexPaths, dict: &Dictionary) -> Result<()> {
    write_bincode(&paths.dictionary(), dict)
}

pub fn load_dictionary(paths: &IndexPaths) -> Result<Dictionary> {
    read_bincode(&paths.dictionary())
}

pub fn save_docs(paths: &IndexPaths, docs: &HashMap<DocId, DocMeta>) -> Result<()> {
    write_bincode(&paths.docs(), docs)
}

pub fn load_docs(paths: &IndexPaths) -> Result<HashMap<DocId, DocMeta>> {
    read_bincode(&paths.docs())
}

/// Drops every posting list so a commit can renumber terms from scratch.
pub fn reset_postings(paths: &IndexPaths) -> Result<()> {
    let dir = paths.postings_dir();
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
    }
    fs::create_dir_all(&dir)?;
    Ok(())
}

pub fn save_postings_for_term(paths: &IndexPaths, term_id: TermId, postings: &[Posting]) -> Result<()> {
    write_bincode(&paths.postings(term_id), &postings)
}

pub fn load_postings_for_term(paths: &IndexPaths, term_id: TermId) -> Result<Vec<Posting>> {
    read_bincode(&paths.postings(term_id))
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(paths.meta(), json)?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let buf = fs::read_to_string(paths.meta())?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Header structures needed before any posting list is touched: dictionary, df, docs, meta.
pub fn load_index_header(paths: &IndexPaths) -> Result<(Dictionary, HashMap<DocId, DocMeta>, MetaFile)> {
    let meta = load_meta(paths)?;
    anyhow::ensure!(meta.version == FORMAT_VERSION, "unsupported index format version {}", meta.version);
    let dict = load_dictionary(paths)?;
    let docs = load_docs(paths)?;
    Ok((dict, docs, meta))
}
