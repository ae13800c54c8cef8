//! Background speckle and decoy glyph passes.

use obscura_common::{Complexity, Result};
use rand::Rng;

use super::{DrawContext, Operation};
use crate::canvas::Canvas;
use crate::palette::{random_color, random_light_color};
use crate::rng::below;
use crate::text::generate_symbol;

/// `(W * H) / density`, saturating into `u32`
fn particle_count(canvas: &Canvas, density: u32) -> u32 {
    let area = u64::from(canvas.width()) * u64::from(canvas.height());
    u32::try_from(area / u64::from(density.max(1))).unwrap_or(u32::MAX)
}

/// Single and double pixel speckle in random colors
#[derive(Debug, Clone, Copy)]
pub struct Noise {
    complexity: Complexity,
}

impl Noise {
    pub fn new(complexity: Complexity) -> Self {
        Self { complexity }
    }
}

impl Operation for Noise {
    fn name(&self) -> &'static str {
        "noise"
    }

    fn apply(&self, canvas: &mut Canvas, ctx: &mut DrawContext<'_>) -> Result<()> {
        let count = particle_count(canvas, self.complexity.noise_density());
        let rng = &mut *ctx.rng;

        for _ in 0..count {
            let x = i64::from(below(rng, canvas.width()));
            let y = i64::from(below(rng, canvas.height()));
            canvas.put_pixel(x, y, random_color(rng));

            // Roughly one particle in three gets a diagonal twin
            if below(rng, count) % 3 == 0 {
                canvas.put_pixel(x + 1, y + 1, random_color(rng));
            }
        }
        Ok(())
    }
}

/// Light decoy glyphs scattered behind the challenge text
#[derive(Debug, Clone, Copy)]
pub struct TextNoise {
    complexity: Complexity,
}

impl TextNoise {
    pub fn new(complexity: Complexity) -> Self {
        Self { complexity }
    }
}

impl Operation for TextNoise {
    fn name(&self) -> &'static str {
        "text_noise"
    }

    fn apply(&self, canvas: &mut Canvas, ctx: &mut DrawContext<'_>) -> Result<()> {
        let count = particle_count(canvas, self.complexity.text_noise_density());
        let rng = &mut *ctx.rng;

        let base_size = canvas.height() as f32 / (1.0 + rng.random_range(0..7) as f32 / 10.0);

        for _ in 0..count {
            let symbol = generate_symbol(rng)?;
            let size = base_size / 2.0 + rng.random_range(0..5) as f32;
            let color = random_light_color(rng);
            let font = ctx.fonts.select_random(rng)?;

            let x = i64::from(below(rng, canvas.width()));
            let y = i64::from(below(rng, canvas.height()));
            canvas.draw_glyph(font, symbol, size, x, y, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontRegistry;
    use image::Rgba;
    use obscura_common::CaptchaError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn changed_pixels(canvas: &Canvas) -> usize {
        canvas.image().pixels().filter(|p| **p != WHITE).count()
    }

    fn run(op: &dyn Operation, fonts: &FontRegistry, seed: u64) -> Result<Canvas> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = DrawContext::new(&mut rng, fonts);
        let mut canvas = Canvas::new(240, 80, 72, WHITE)?;
        op.apply(&mut canvas, &mut ctx)?;
        Ok(canvas)
    }

    #[test]
    fn test_particle_count() {
        let canvas = Canvas::new(240, 80, 72, WHITE).unwrap();
        assert_eq!(particle_count(&canvas, 28), 685);
        assert_eq!(particle_count(&canvas, 2000), 9);
        let tiny = Canvas::new(3, 3, 72, WHITE).unwrap();
        assert_eq!(particle_count(&tiny, 28), 0);
    }

    #[test]
    fn test_noise_density_ordering() {
        let fonts = FontRegistry::embedded();
        let low = changed_pixels(&run(&Noise::new(Complexity::Low), &fonts, 1).unwrap());
        let high = changed_pixels(&run(&Noise::new(Complexity::High), &fonts, 1).unwrap());
        assert!(low > 0);
        assert!(high > low, "high={high} low={low}");
        // Never more than two pixels per particle
        assert!(low <= 2 * 685);
    }

    #[test]
    fn test_noise_on_tiny_canvas_is_noop() {
        let fonts = FontRegistry::embedded();
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = DrawContext::new(&mut rng, &fonts);
        let mut canvas = Canvas::new(1, 1, 72, WHITE).unwrap();
        Noise::new(Complexity::High).apply(&mut canvas, &mut ctx).unwrap();
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_text_noise_draws_glyphs() {
        let fonts = FontRegistry::embedded();
        let canvas = run(&TextNoise::new(Complexity::High), &fonts, 5).unwrap();
        assert!(changed_pixels(&canvas) > 0);
    }

    #[test]
    fn test_text_noise_fails_without_fonts() {
        let fonts = FontRegistry::new(Vec::new());
        let err = run(&TextNoise::new(Complexity::Low), &fonts, 5).unwrap_err();
        assert!(matches!(err, CaptchaError::FontLoad(_)));
    }
}
