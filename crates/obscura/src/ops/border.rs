//! One pixel frame around the image.

use image::Rgba;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use obscura_common::Result;

use super::{DrawContext, Operation};
use crate::canvas::Canvas;

/// Paints the top and bottom rows and the left and right columns
#[derive(Debug, Clone, Copy)]
pub struct Border {
    color: Rgba<u8>,
}

impl Border {
    pub fn new(color: Rgba<u8>) -> Self {
        Self { color }
    }
}

impl Operation for Border {
    fn name(&self) -> &'static str {
        "border"
    }

    fn apply(&self, canvas: &mut Canvas, _ctx: &mut DrawContext<'_>) -> Result<()> {
        let frame = Rect::at(0, 0).of_size(canvas.width(), canvas.height());
        draw_hollow_rect_mut(canvas.image_mut(), frame, self.color);
        Ok(())
    }
}
