use std::path::{Path, PathBuf};

pub const RAW_CORPUS_FILE: &str = "aws_releases.txt";
pub const POST_STORE_FILE: &str = "aws_releases.json";
pub const INDEX_DIR: &str = "recap.index";
pub const FONT_FILE: &str = "roboto-regular.ttf";
pub const OUTPUT_IMAGE_FILE: &str = "wordcloud.png";

/// Fixed file names resolved against one root directory.
#[derive(Debug, Clone)]
pub struct Layout {
    pub root: PathBuf,
}

impl Layout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn raw_corpus(&self) -> PathBuf { self.root.join(RAW_CORPUS_FILE) }
    pub fn post_store(&self) -> PathBuf { self.root.join(POST_STORE_FILE) }
    pub fn index_dir(&self) -> PathBuf { self.root.join(INDEX_DIR) }
    pub fn font(&self) -> PathBuf { self.root.join(FONT_FILE) }
    pub fn output_image(&self) -> PathBuf { self.root.join(OUTPUT_IMAGE_FILE) }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(".")
    }
}
