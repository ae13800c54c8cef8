//! # Obscura
//!
//! Synthesizes visual text challenges: a JPEG image containing a short,
//! obscured alphanumeric secret plus the matching plaintext.
//!
//! ## Pipeline
//! ```text
//! text::generate_text ──> Canvas::new(light background)
//!                              │
//!     Noise → TextNoise → Text → Curve → Border   (ops, caller ordered)
//!                              │
//!                     Canvas::encode (JPEG, q=100)
//! ```
//!
//! The secret is drawn from a cryptographic source; every visual parameter
//! comes from a separate jitter generator passed explicitly into each pass.

pub mod canvas;
pub mod fonts;
pub mod generator;
pub mod ops;
pub mod palette;
pub mod rng;
pub mod text;
pub mod verify;

pub use canvas::Canvas;
pub use fonts::{FontCatalogue, FontRegistry, FontSource, FontState};
pub use generator::{CaptchaGenerator, Challenge};
pub use ops::{DrawContext, Operation};
pub use verify::{Secret, verify_text};

pub use obscura_common::{CaptchaError, ChallengeOptions, Complexity, Result};
