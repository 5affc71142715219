use crate::{Result, TermCounts};

pub const CANVAS_SIZE: u32 = 2048;
pub const PALETTE_SIZE: usize = 8;

pub type Rgb = [u8; 3];

/// Everything the renderer needs besides the counts.
#[derive(Debug, Clone)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    /// Raw TrueType/OpenType font file.
    pub font: Vec<u8>,
    pub palette: Vec<Rgb>,
    pub min_font_size: f32,
    pub max_font_size: f32,
    pub max_words: usize,
}

impl CloudConfig {
    pub fn new(font: Vec<u8>, palette: Vec<Rgb>) -> Self {
        Self {
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
            font,
            palette,
            min_font_size: 18.0,
            max_font_size: 240.0,
            max_words: 500,
        }
    }
}

pub trait PaletteGenerator {
    fn generate(&self, count: usize) -> Result<Vec<Rgb>>;
}

/// Lays out and rasterizes a word cloud, returning the encoded image file.
pub trait CloudRenderer {
    fn render(&self, counts: &TermCounts, config: &CloudConfig) -> Result<Vec<u8>>;
}
