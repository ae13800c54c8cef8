//! Sinusoidal distortion band.

use std::f64::consts::PI;

use imageproc::drawing::draw_line_segment_mut;
use obscura_common::Result;

use super::{DrawContext, Operation};
use crate::canvas::Canvas;
use crate::palette::random_curve_color;
use crate::rng::{below, signed_range};

/// Randomized sine wave parameters for one stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Amplitude in `[0, H/2)`
    pub amplitude: f64,
    /// Vertical offset in `±H/4`
    pub offset: f64,
    /// Horizontal phase in `±H/4`
    pub phase: f64,
    /// Period between `min(H, W/2)` and `max(H, W/2)`
    pub period: f64,
    /// Last column (exclusive), 80-100% of the width
    pub end: i64,
}

impl Wave {
    /// Row of the curve at column `x`, or `None` when the period is degenerate
    pub fn y_at(&self, x: i64, width: u32) -> Option<f64> {
        if self.period.round() == 0.0 {
            return None;
        }
        let omega = 2.0 * PI / self.period;
        Some(self.amplitude * (omega * x as f64 + self.phase).sin() + self.offset + f64::from(width) / 5.0)
    }
}

/// Overlays one sine-shaped band, `H/5` pixels thick
#[derive(Debug, Clone, Copy, Default)]
pub struct Curve;

impl Curve {
    fn wave(canvas: &Canvas, ctx: &mut DrawContext<'_>) -> Wave {
        let rng = &mut *ctx.rng;
        let h = i64::from(canvas.height());
        let w = i64::from(canvas.width());

        let amplitude = f64::from(below(rng, canvas.height() / 2));
        let offset = signed_range(rng, -h / 4, h / 4);
        let phase = signed_range(rng, -h / 4, h / 4);
        let period = if h > w / 2 {
            signed_range(rng, w / 2, h)
        } else {
            signed_range(rng, h, w / 2)
        };
        let end = signed_range(rng, (w as f64 * 0.8) as i64, w) as i64;

        Wave { amplitude, offset, phase, period, end }
    }
}

impl Operation for Curve {
    fn name(&self) -> &'static str {
        "curve"
    }

    fn apply(&self, canvas: &mut Canvas, ctx: &mut DrawContext<'_>) -> Result<()> {
        let wave = Self::wave(canvas, ctx);
        let color = random_curve_color(&mut *ctx.rng);
        let thickness = canvas.height() / 5;

        if thickness == 0 || wave.period.round() == 0.0 {
            tracing::trace!(period = wave.period, "Skipping degenerate curve");
            return Ok(());
        }

        let width = canvas.width();
        for x in 0..wave.end {
            let Some(y) = wave.y_at(x, width) else {
                break;
            };
            let top = y.trunc() as f32;
            draw_line_segment_mut(
                canvas.image_mut(),
                (x as f32, top),
                (x as f32, top + (thickness - 1) as f32),
                color,
            );
        }
        Ok(())
    }
}
