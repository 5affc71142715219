//! The three commands, written against the store and renderer traits.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::info;

use crate::frequency::{term_counts, Inclusion};
use crate::gateway::{bulk_load, BulkLoadReport, IndexStore, SearchResults, CLOUD_LIMIT, SEARCH_LIMIT};
use crate::parser::read_corpus;
use crate::persist::{load_posts, save_posts};
use crate::render::{CloudConfig, CloudRenderer, PaletteGenerator, PALETTE_SIZE};
use crate::{Layout, RecapError, Result};

#[derive(Debug, Clone, Copy)]
pub struct BuildReport {
    pub parsed: usize,
    pub stored: usize,
    pub index: BulkLoadReport,
}

/// Raw corpus -> post store -> fresh index.
pub fn build<S: IndexStore>(layout: &Layout) -> Result<BuildReport> {
    let posts = read_corpus(&layout.raw_corpus())?;
    info!(posts = posts.len(), "parsed raw corpus");
    let stored = save_posts(&layout.post_store(), &posts)?;
    let mut store = S::build(&layout.index_dir())?;
    let index = bulk_load(&mut store, &posts)?;
    Ok(BuildReport { parsed: posts.len(), stored, index })
}

pub fn search<S: IndexStore>(layout: &Layout, q: &str) -> Result<SearchResults> {
    let store = S::open(&layout.index_dir())?;
    store.query(q, SEARCH_LIMIT)
}

/// An empty query includes every post without touching the index.
pub fn inclusion_for_query<S: IndexStore>(layout: &Layout, q: &str) -> Result<Inclusion> {
    if q.is_empty() {
        return Ok(Inclusion::All);
    }
    let store = S::open(&layout.index_dir())?;
    let results = store.query(q, CLOUD_LIMIT)?;
    Ok(Inclusion::from_hits(&results.hits))
}

#[derive(Debug, Clone)]
pub struct CloudReport {
    pub posts: usize,
    pub terms: usize,
    pub output: PathBuf,
}

pub fn cloud<S, P, R>(layout: &Layout, q: &str, palette: &P, renderer: &R) -> Result<CloudReport>
where
    S: IndexStore,
    P: PaletteGenerator,
    R: CloudRenderer,
{
    let posts = load_posts(&layout.post_store())?;
    let inclusion = inclusion_for_query::<S>(layout, q)?;
    let freq = term_counts(&posts, &inclusion);
    info!(posts = freq.posts, terms = freq.counts.len(), "counted terms");

    let font = fs::read(layout.font()).map_err(|err| match err.kind() {
        ErrorKind::NotFound => RecapError::render(format!("font {} not found", layout.font().display())),
        _ => err.into(),
    })?;
    let config = CloudConfig::new(font, palette.generate(PALETTE_SIZE)?);
    let png = renderer.render(&freq.counts, &config)?;

    let output = layout.output_image();
    fs::write(&output, png)?;
    Ok(CloudReport { posts: freq.posts, terms: freq.counts.len(), output })
}
