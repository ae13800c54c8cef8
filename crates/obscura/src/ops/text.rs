//! The challenge glyphs themselves.

use obscura_common::{CaptchaError, Result};
use rand::Rng;

use super::{DrawContext, Operation};
use crate::canvas::Canvas;
use crate::palette::random_deep_color;
use crate::rng::below;

/// Draws each character of the secret in its own slot.
///
/// Every character gets an independent font, size, and deep color so no
/// two glyphs share a template.
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Operation for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn apply(&self, canvas: &mut Canvas, ctx: &mut DrawContext<'_>) -> Result<()> {
        let count = self.text.chars().count();
        if count == 0 {
            return Err(CaptchaError::InvalidInput("challenge text is empty".to_string()));
        }

        let rng = &mut *ctx.rng;
        let height = canvas.height();
        let slot = i64::from(canvas.width()) / count as i64;

        for (i, ch) in self.text.chars().enumerate() {
            let size = height as f32 / (1.0 + rng.random_range(0..7) as f32 / 9.0);
            let color = random_deep_color(rng);
            let font = ctx.fonts.select_random(rng)?;

            let (x, y) = glyph_origin(slot, i, size, below(rng, height / 2));
            canvas.draw_glyph(font, ch, size, x, y, color);
        }
        Ok(())
    }
}

/// Baseline origin of glyph `index`: its slot start nudged right by
/// `slot / size`, and `drop` pixels plus half the size below the top margin.
fn glyph_origin(slot: i64, index: usize, size: f32, drop: u32) -> (i64, i64) {
    // Larger glyphs shift left within their slot
    let x = slot * index as i64 + slot / (size as i64).max(1);
    let y = 5 + i64::from(drop) + (size / 2.0) as i64;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontRegistry;
    use image::Rgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn canvas() -> Canvas {
        Canvas::new(240, 80, 72, WHITE).unwrap()
    }

    #[test]
    fn test_text_marks_each_slot() {
        let fonts = FontRegistry::embedded();
        let mut rng = StdRng::seed_from_u64(8);
        let mut ctx = DrawContext::new(&mut rng, &fonts);
        let mut canvas = canvas();
        Text::new("WMWM").apply(&mut canvas, &mut ctx).unwrap();

        let touched: Vec<u32> = canvas
            .image()
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != WHITE)
            .map(|(x, _, _)| x)
            .collect();
        assert!(!touched.is_empty());
        assert!(touched.iter().any(|&x| x < 60));
    }

    #[test]
    fn test_glyph_origin_per_slot() {
        // 240px wide, four characters: 60px slots
        for i in 0..4 {
            assert_eq!(glyph_origin(60, i, 48.0, 0), (60 * i as i64 + 1, 29));
        }
        assert_eq!(glyph_origin(60, 2, 80.0, 17), (120, 62));
        assert_eq!(glyph_origin(60, 1, 20.0, 39), (63, 54));
    }

    #[test]
    fn test_glyph_origin_small_sizes() {
        // Sub-pixel sizes divide by one rather than zero
        assert_eq!(glyph_origin(60, 3, 0.5, 0), (240, 5));
        assert_eq!(glyph_origin(0, 7, 0.0, 0), (0, 5));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let fonts = FontRegistry::embedded();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = DrawContext::new(&mut rng, &fonts);
        let err = Text::new("").apply(&mut canvas(), &mut ctx).unwrap_err();
        assert!(matches!(err, CaptchaError::InvalidInput(_)));
    }

    #[test]
    fn test_text_wider_than_canvas() {
        let fonts = FontRegistry::embedded();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = DrawContext::new(&mut rng, &fonts);
        let mut narrow = Canvas::new(3, 1, 72, WHITE).unwrap();
        Text::new("abcdefgh").apply(&mut narrow, &mut ctx).unwrap();
        assert_eq!(narrow.image().dimensions(), (3, 1));
    }

    #[test]
    fn test_text_fails_without_fonts() {
        let fonts = FontRegistry::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = DrawContext::new(&mut rng, &fonts);
        let err = Text::new("ab").apply(&mut canvas(), &mut ctx).unwrap_err();
        assert!(matches!(err, CaptchaError::FontLoad(_)));
    }
}
