use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recap_core::{PaletteGenerator, RecapError, Result, Rgb};

/// Soft, evenly spaced hues with a random starting point.
#[derive(Debug, Default, Clone, Copy)]
pub struct PastelPalette {
    seed: Option<u64>,
}

impl PastelPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same seed, same colors.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl PaletteGenerator for PastelPalette {
    fn generate(&self, count: usize) -> Result<Vec<Rgb>> {
        if count == 0 {
            return Err(RecapError::render("palette needs at least one color"));
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let offset: f32 = rng.random_range(0.0..360.0);
        let step = 360.0 / count as f32;
        Ok((0..count)
            .map(|i| {
                let hue = (offset + step * i as f32) % 360.0;
                let saturation = rng.random_range(0.35..0.6);
                let value = rng.random_range(0.72..0.9);
                hsv_to_rgb(hue, saturation, value)
            })
            .collect())
    }
}

pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let c = value * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(r), channel(g), channel(b)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), [0, 0, 255]);
        assert_eq!(hsv_to_rgb(42.0, 0.0, 1.0), [255, 255, 255]);
    }

    #[test]
    fn seeded_palettes_repeat() {
        let a = PastelPalette::seeded(7).generate(8).unwrap();
        let b = PastelPalette::seeded(7).generate(8).unwrap();
        assert_eq!(a.len(), 8);
        assert_eq!(a, b);
    }

    #[test]
    fn colors_are_soft() {
        for [r, g, b] in PastelPalette::new().generate(8).unwrap() {
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            assert!(max <= 230, "too bright: {r},{g},{b}");
            assert!(min > 0, "fully saturated: {r},{g},{b}");
        }
    }

    #[test]
    fn empty_palette_is_an_error() {
        assert!(matches!(PastelPalette::new().generate(0), Err(RecapError::Render(_))));
    }
}
