//! Drawing operations: independent passes applied to a canvas in order.
//!
//! Each pass mutates pixels in place and never resizes the canvas. The first
//! failing pass aborts the rest of the pipeline.

mod border;
mod curve;
mod noise;
mod text;

pub use border::Border;
pub use curve::Curve;
pub use noise::{Noise, TextNoise};
pub use text::Text;

use image::Rgba;
use obscura_common::Result;
use rand::CryptoRng;

use crate::canvas::Canvas;
use crate::fonts::FontRegistry;

/// Shared resources handed to every pass
pub struct DrawContext<'a> {
    /// Jitter randomness for every visual parameter and decoy symbol
    pub rng: &'a mut dyn CryptoRng,
    /// Font catalogue for glyph passes
    pub fonts: &'a FontRegistry,
}

impl<'a> DrawContext<'a> {
    pub fn new(rng: &'a mut dyn CryptoRng, fonts: &'a FontRegistry) -> Self {
        Self { rng, fonts }
    }
}

/// A single drawing pass
pub trait Operation: Send + Sync {
    /// Short name used in errors and logs
    fn name(&self) -> &'static str;

    /// Mutate the canvas in place
    fn apply(&self, canvas: &mut Canvas, ctx: &mut DrawContext<'_>) -> Result<()>;
}

/// Apply `ops` in order, stopping at the first failure.
///
/// Errors carry the name of the pass that raised them.
pub fn apply_all(
    canvas: &mut Canvas,
    ops: &[Box<dyn Operation>],
    ctx: &mut DrawContext<'_>,
) -> Result<()> {
    for op in ops {
        tracing::trace!(operation = op.name(), "Applying drawing pass");
        if let Err(e) = op.apply(canvas, ctx) {
            let e = e.in_operation(op.name());
            tracing::warn!(operation = op.name(), kind = e.kind(), error = %e, "Drawing pass failed");
            return Err(e);
        }
    }
    Ok(())
}

/// The default layering: Noise → TextNoise → Text → Curve → Border
pub fn reference_pipeline(
    text: &str,
    complexity: obscura_common::Complexity,
    border: Rgba<u8>,
) -> Vec<Box<dyn Operation>> {
    vec![
        Box::new(Noise::new(complexity)),
        Box::new(TextNoise::new(complexity)),
        Box::new(Text::new(text)),
        Box::new(Curve),
        Box::new(Border::new(border)),
    ]
}
