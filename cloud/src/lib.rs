//! Word-cloud rendering: pastel palettes, spiral layout, PNG output.

pub mod layout;
pub mod palette;
pub mod renderer;

pub use palette::PastelPalette;
pub use renderer::WordCloud;
