use ab_glyph::{FontVec, PxScale};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use recap_core::{CloudConfig, CloudRenderer, RecapError, Result, TermCounts};
use tracing::debug;

use crate::layout::place_boxes;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PADDING: u32 = 2;

/// Draws words on a white canvas and encodes the result as PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCloud;

impl WordCloud {
    pub fn new() -> Self {
        Self
    }
}

/// Most frequent first, ties in alphabetical order, at most `max_words`.
pub fn ranked(counts: &TermCounts, max_words: usize) -> Vec<(&str, usize)> {
    let mut words: Vec<(&str, usize)> = counts.iter().map(|(t, &c)| (t.as_str(), c)).collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    words.truncate(max_words);
    words
}

/// Linear interpolation between the configured font sizes by count.
pub fn font_size(count: usize, lowest: usize, highest: usize, config: &CloudConfig) -> f32 {
    if highest <= lowest {
        return config.max_font_size;
    }
    let t = (count - lowest) as f32 / (highest - lowest) as f32;
    config.min_font_size + (config.max_font_size - config.min_font_size) * t
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(canvas.as_raw(), canvas.width(), canvas.height(), ExtendedColorType::Rgba8)
        .map_err(|e| RecapError::Encode(e.to_string()))?;
    Ok(bytes)
}

impl CloudRenderer for WordCloud {
    fn render(&self, counts: &TermCounts, config: &CloudConfig) -> Result<Vec<u8>> {
        if counts.is_empty() {
            return Err(RecapError::render("no words to draw"));
        }
        if config.palette.is_empty() {
            return Err(RecapError::render("empty palette"));
        }
        if config.width == 0 || config.height == 0 {
            return Err(RecapError::render(format!("invalid canvas size {}x{}", config.width, config.height)));
        }
        let font = FontVec::try_from_vec(config.font.clone()).map_err(|e| RecapError::render(format!("invalid font: {e}")))?;

        let words = ranked(counts, config.max_words);
        let highest = words.first().map(|w| w.1).unwrap_or(0);
        let lowest = words.last().map(|w| w.1).unwrap_or(0);

        let scales: Vec<PxScale> = words
            .iter()
            .map(|&(_, count)| PxScale::from(font_size(count, lowest, highest, config)))
            .collect();
        let sizes: Vec<(u32, u32)> = words
            .iter()
            .zip(&scales)
            .map(|(&(word, _), &scale)| {
                let (w, h) = text_size(scale, &font, word);
                (w + 2 * PADDING, h + 2 * PADDING)
            })
            .collect();
        let slots = place_boxes(&sizes, config.width, config.height);

        let mut canvas = RgbaImage::from_pixel(config.width, config.height, BACKGROUND);
        let mut drawn = 0;
        for (rank, ((&(word, count), &scale), slot)) in words.iter().zip(&scales).zip(&slots).enumerate() {
            let Some(rect) = slot else {
                debug!(word, count, "no room for word");
                continue;
            };
            let [r, g, b] = config.palette[rank % config.palette.len()];
            draw_text_mut(&mut canvas, Rgba([r, g, b, 255]), rect.x + PADDING as i32, rect.y + PADDING as i32, scale, &font, word);
            drawn += 1;
        }
        debug!(words = words.len(), drawn, "word cloud laid out");
        encode_png(&canvas)
    }
}
