//! Shared constants for Obscura components.

/// Default image width in pixels
pub const DEFAULT_WIDTH: u32 = 240;

/// Default image height in pixels
pub const DEFAULT_HEIGHT: u32 = 80;

/// Default rendering DPI
pub const DEFAULT_DPI: u32 = 72;

/// Default number of characters in a challenge
pub const DEFAULT_TEXT_LENGTH: usize = 4;

/// Default border color (RGB)
pub const DEFAULT_BORDER_COLOR: [u8; 3] = [170, 170, 170];

/// JPEG quality used for every encoded challenge
pub const JPEG_QUALITY: u8 = 100;

/// Points per inch; font sizes are given in points and scaled by `dpi / 72`
pub const POINTS_PER_INCH: f32 = 72.0;

/// Alphabet the challenge text is drawn from (62 symbols)
pub const ALPHANUMERIC: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Pixels-per-particle for the speckle noise pass
pub mod noise_density {
    pub const LOW: u32 = 28;
    pub const MEDIUM: u32 = 18;
    pub const HIGH: u32 = 8;
}

/// Pixels-per-glyph for the decoy text pass
pub mod text_noise_density {
    pub const LOW: u32 = 2000;
    pub const MEDIUM: u32 = 1500;
    pub const HIGH: u32 = 1000;
}

/// Palette bounds
pub mod palette {
    /// Energy cap shared by the three channels of a random color
    pub const ENERGY_CAP: i32 = 400;

    /// Lower bound of each channel of a light color
    pub const LIGHT_MIN: u8 = 200;

    /// Width of the light color channel range
    pub const LIGHT_SPAN: u8 = 55;

    /// Minimum darkening offset applied to deep colors
    pub const DEEP_OFFSET_MIN: i32 = 30;

    /// Upper bound (exclusive) of each channel of the curve stroke
    pub const CURVE_CHANNEL_MAX: u8 = 150;
}

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "OBSCURA";
