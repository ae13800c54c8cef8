//! Challenge generation: secret text, layered drawing, JPEG encoding.

use std::sync::Arc;

use image::Rgba;
use obscura_common::constants::DEFAULT_BORDER_COLOR;
use obscura_common::{ChallengeOptions, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, TryCryptoRng};

use crate::canvas::Canvas;
use crate::fonts::FontRegistry;
use crate::ops::{self, DrawContext, Operation};
use crate::palette::random_light_color;
use crate::text::generate_text;
use crate::verify::Secret;

/// A finished challenge: the encoded image and its secret
#[derive(Debug)]
pub struct Challenge {
    /// JPEG bytes
    pub image: Vec<u8>,
    /// Plaintext the user must type back
    pub secret: Secret,
}

impl Challenge {
    /// Split into `(image_bytes, secret_text)`
    pub fn into_parts(self) -> (Vec<u8>, String) {
        (self.image, self.secret.into_string())
    }
}

/// CAPTCHA generator service
#[derive(Debug, Clone)]
pub struct CaptchaGenerator {
    fonts: Arc<FontRegistry>,
    border: Rgba<u8>,
}

impl Default for CaptchaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptchaGenerator {
    /// Generator over the embedded font set
    pub fn new() -> Self {
        Self::with_fonts(FontRegistry::embedded())
    }

    pub fn with_fonts(fonts: Arc<FontRegistry>) -> Self {
        let [r, g, b] = DEFAULT_BORDER_COLOR;
        Self {
            fonts,
            border: Rgba([r, g, b, 255]),
        }
    }

    pub fn border_color(mut self, rgb: [u8; 3]) -> Self {
        self.border = Rgba([rgb[0], rgb[1], rgb[2], 255]);
        self
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Generate a new challenge.
    ///
    /// The secret comes from the operating system's entropy source and the
    /// visual jitter from the thread-local generator.
    pub fn generate(&self, opts: &ChallengeOptions) -> Result<Challenge> {
        let mut jitter = rand::rng();
        self.generate_with(opts, &mut OsRng, &mut jitter)
    }

    /// Generate a challenge from explicit randomness sources
    pub fn generate_with<S, J>(
        &self,
        opts: &ChallengeOptions,
        secret_rng: &mut S,
        jitter: &mut J,
    ) -> Result<Challenge>
    where
        S: TryCryptoRng + ?Sized,
        J: CryptoRng,
    {
        opts.validate()?;

        let text = generate_text(secret_rng, opts.text_length)?;
        let image = self.render_with(opts, &text, jitter)?;

        tracing::debug!(
            width = opts.width,
            height = opts.height,
            dpi = opts.dpi,
            length = opts.text_length,
            complexity = %opts.complexity,
            bytes = image.len(),
            "Generated CAPTCHA challenge"
        );

        Ok(Challenge {
            image,
            secret: Secret::new(text),
        })
    }

    /// Draw a fresh image for an already issued secret
    pub fn render(&self, opts: &ChallengeOptions, secret: &str) -> Result<Vec<u8>> {
        let mut jitter = rand::rng();
        self.render_with(opts, secret, &mut jitter)
    }

    /// Draw and encode an image for `secret` with explicit jitter
    pub fn render_with<J: CryptoRng>(
        &self,
        opts: &ChallengeOptions,
        secret: &str,
        jitter: &mut J,
    ) -> Result<Vec<u8>> {
        opts.validate()?;

        let background = random_light_color(jitter);
        let pipeline = ops::reference_pipeline(secret, opts.complexity, self.border);
        let canvas = self.create_image(
            opts.width,
            opts.height,
            opts.dpi,
            background,
            &pipeline,
            jitter,
        )?;
        canvas.encode_to_vec()
    }

    /// Create a canvas and run `ops` over it in order
    pub fn create_image<J: CryptoRng>(
        &self,
        width: u32,
        height: u32,
        dpi: u32,
        background: Rgba<u8>,
        ops: &[Box<dyn Operation>],
        jitter: &mut J,
    ) -> Result<Canvas> {
        let mut canvas = Canvas::new(width, height, dpi, background)?;
        let mut ctx = DrawContext::new(jitter, &self.fonts);

        ops::apply_all(&mut canvas, ops, &mut ctx)?;
        Ok(canvas)
    }
}
