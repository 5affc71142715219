//! In-memory stand-ins for the index and the renderer.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use recap_core::{CloudConfig, CloudRenderer, Hit, IndexStore, PaletteGenerator, RecapError, Result, Rgb, SearchResults, TermCounts};

/// Substring index persisted as one JSON file. Scores are occurrence counts.
pub struct FakeIndex {
    dir: PathBuf,
    docs: BTreeMap<String, String>,
    pub fail_on: Option<String>,
}

impl FakeIndex {
    fn file(dir: &Path) -> PathBuf {
        dir.join("docs.json")
    }
}

impl IndexStore for FakeIndex {
    fn build(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(RecapError::IndexCreate { path: path.to_path_buf(), reason: "already exists".into() });
        }
        fs::create_dir_all(path)?;
        Ok(Self { dir: path.to_path_buf(), docs: BTreeMap::new(), fail_on: None })
    }

    fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(Self::file(path)).map_err(|_| RecapError::IndexNotFound { path: path.to_path_buf() })?;
        Ok(Self { dir: path.to_path_buf(), docs: serde_json::from_slice(&bytes)?, fail_on: None })
    }

    fn add(&mut self, id: &str, title: &str, description: &str) -> Result<()> {
        if self.fail_on.as_deref() == Some(id) {
            return Err(RecapError::index_add(id, "refused"));
        }
        self.docs.insert(id.to_string(), format!("{title} {description}").to_lowercase());
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        fs::write(Self::file(&self.dir), serde_json::to_vec(&self.docs)?)?;
        Ok(())
    }

    fn query(&self, text: &str, limit: usize) -> Result<SearchResults> {
        let needle = text.to_lowercase();
        let mut hits: Vec<Hit> = self
            .docs
            .iter()
            .filter_map(|(id, body)| {
                let n = body.matches(needle.as_str()).count();
                (n > 0).then(|| Hit { id: id.clone(), score: n as f32 })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        let total_hits = hits.len();
        hits.truncate(limit);
        Ok(SearchResults { query: text.to_string(), total_hits, hits, took: Duration::ZERO })
    }
}

pub struct FixedPalette;

impl PaletteGenerator for FixedPalette {
    fn generate(&self, count: usize) -> Result<Vec<Rgb>> {
        Ok(vec![[200, 200, 255]; count])
    }
}

/// "Renders" the sorted counts as text so tests can inspect what reached the renderer.
pub struct TextRenderer;

impl CloudRenderer for TextRenderer {
    fn render(&self, counts: &TermCounts, config: &CloudConfig) -> Result<Vec<u8>> {
        if counts.is_empty() {
            return Err(RecapError::render("no words to draw"));
        }
        let sorted: BTreeMap<_, _> = counts.iter().collect();
        let mut out = format!("{}x{} palette={}\n", config.width, config.height, config.palette.len());
        for (term, count) in sorted {
            out.push_str(&format!("{term} {count}\n"));
        }
        Ok(out.into_bytes())
    }
}
