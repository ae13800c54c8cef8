//! Mutable RGBA pixel buffer that drawing passes compose onto.

use std::io::Write;

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::pixelops::interpolate;
use obscura_common::constants::{JPEG_QUALITY, POINTS_PER_INCH};
use obscura_common::{CaptchaError, Result};
use rusttype::{Font, Scale, point};

/// A challenge image under construction
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    dpi: u32,
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a canvas with every pixel set to `background`
    pub fn new(width: u32, height: u32, dpi: u32, background: Rgba<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CaptchaError::InvalidInput(format!(
                "canvas dimensions must be positive, got {width}x{height}"
            )));
        }
        if dpi == 0 {
            return Err(CaptchaError::InvalidInput("dpi must be positive".to_string()));
        }

        Ok(Self {
            width,
            height,
            dpi,
            pixels: RgbaImage::from_pixel(width, height, background),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.pixels.get_pixel_checked(x, y).copied()
    }

    /// Paint a pixel; coordinates outside the canvas are ignored
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if let Some((x, y)) = self.clip(x, y) {
            self.pixels.put_pixel(x, y, color);
        }
    }

    /// Mix `color` over the current pixel by `coverage` in `[0, 1]`
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba<u8>, coverage: f32) {
        if coverage <= 0.0 {
            return;
        }
        if let Some((x, y)) = self.clip(x, y) {
            let below = *self.pixels.get_pixel(x, y);
            let mixed = interpolate(color, below, coverage.min(1.0));
            self.pixels.put_pixel(x, y, mixed);
        }
    }

    fn clip(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((x as u32, y as u32))
    }

    /// Render one glyph with its baseline origin at `(x, y)`.
    ///
    /// `size` is in points; the pixel size is `size * dpi / 72`.
    pub fn draw_glyph(
        &mut self,
        font: &Font<'_>,
        ch: char,
        size: f32,
        x: i64,
        y: i64,
        color: Rgba<u8>,
    ) {
        let pixel_size = size * self.dpi as f32 / POINTS_PER_INCH;
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return;
        }

        let glyph = font
            .glyph(ch)
            .scaled(Scale::uniform(pixel_size))
            .positioned(point(x as f32, y as f32));

        let Some(bounds) = glyph.pixel_bounding_box() else {
            return;
        };

        glyph.draw(|gx, gy, coverage| {
            self.blend_pixel(
                i64::from(bounds.min.x) + i64::from(gx),
                i64::from(bounds.min.y) + i64::from(gy),
                color,
                coverage,
            );
        });
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    /// Encode as a maximum-quality JPEG into `writer`
    pub fn encode<W: Write>(&self, writer: W) -> Result<()> {
        let rgb = DynamicImage::ImageRgba8(self.pixels.clone()).to_rgb8();

        let mut encoder = JpegEncoder::new_with_quality(writer, JPEG_QUALITY);
        encoder.set_pixel_density(PixelDensity::dpi(
            u16::try_from(self.dpi).unwrap_or(u16::MAX),
        ));
        encoder
            .encode_image(&rgb)
            .map_err(|e| CaptchaError::Encoding(e.to_string()))
    }

    /// Encode as a maximum-quality JPEG into a fresh buffer
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontRegistry;

    const GREY: Rgba<u8> = Rgba([200, 200, 200, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    struct RejectingSink;

    impl Write for RejectingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("sink closed"))
        }
    }

    #[test]
    fn test_new_fills_background() {
        let canvas = Canvas::new(10, 5, 72, GREY).unwrap();
        assert_eq!((canvas.width(), canvas.height(), canvas.dpi()), (10, 5, 72));
        assert!(canvas.image().pixels().all(|p| *p == GREY));
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(matches!(Canvas::new(0, 5, 72, GREY), Err(CaptchaError::InvalidInput(_))));
        assert!(Canvas::new(5, 0, 72, GREY).is_err());
        assert!(Canvas::new(5, 5, 0, GREY).is_err());
    }

    #[test]
    fn test_put_pixel_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(4, 4, 72, GREY).unwrap();
        canvas.put_pixel(-1, 0, BLACK);
        canvas.put_pixel(4, 4, BLACK);
        canvas.put_pixel(3, 3, BLACK);
        assert_eq!(canvas.pixel(3, 3), Some(BLACK));
        assert_eq!(canvas.image().pixels().filter(|p| **p == BLACK).count(), 1);
    }

    #[test]
    fn test_blend_pixel_coverage() {
        let mut canvas = Canvas::new(2, 1, 72, Rgba([255, 255, 255, 255])).unwrap();
        canvas.blend_pixel(0, 0, BLACK, 1.0);
        canvas.blend_pixel(1, 0, BLACK, 0.0);
        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(1, 0), Some(Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_draw_glyph_marks_pixels() {
        let fonts = FontRegistry::embedded();
        let font = fonts.catalogue().unwrap().get("DejaVuSans.ttf").unwrap();
        let mut canvas = Canvas::new(60, 60, 72, GREY).unwrap();
        canvas.draw_glyph(font, 'W', 40.0, 5, 45, BLACK);
        assert!(canvas.image().pixels().any(|p| *p != GREY));
    }

    #[test]
    fn test_draw_glyph_off_canvas_is_clipped() {
        let fonts = FontRegistry::embedded();
        let font = fonts.catalogue().unwrap().get("DejaVuSans.ttf").unwrap();
        let mut canvas = Canvas::new(20, 20, 72, GREY).unwrap();
        canvas.draw_glyph(font, 'A', 30.0, 500, 500, BLACK);
        assert!(canvas.image().pixels().all(|p| *p == GREY));
    }

    #[test]
    fn test_encode_roundtrip_dimensions() {
        let canvas = Canvas::new(31, 17, 96, GREY).unwrap();
        let bytes = canvas.encode_to_vec().unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (31, 17));
    }

    #[test]
    fn test_encode_reports_sink_failure() {
        let canvas = Canvas::new(8, 8, 72, GREY).unwrap();
        let err = canvas.encode(RejectingSink).unwrap_err();
        assert!(matches!(err, CaptchaError::Encoding(_)));
    }
}
