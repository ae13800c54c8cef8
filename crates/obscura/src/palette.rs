//! Color palette: background, decoy, and foreground colors.

use image::Rgba;
use obscura_common::constants::palette::{
    CURVE_CHANNEL_MAX, DEEP_OFFSET_MIN, ENERGY_CAP, LIGHT_MIN, LIGHT_SPAN,
};
use rand::Rng;

/// Muted color for speckle noise.
///
/// Red and green are drawn from `[0, 255)`; blue takes whatever is left of
/// the energy cap (at most 255), or 0 once red and green exceed it.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba<u8> {
    let red = rng.random_range(0..255);
    let green = rng.random_range(0..255);
    let blue = if red + green <= ENERGY_CAP {
        (ENERGY_CAP - red - green).min(255)
    } else {
        0
    };
    Rgba([red as u8, green as u8, blue as u8, 255])
}

/// Bright color for backgrounds and decoy glyphs: each channel in `[200, 255)`.
pub fn random_light_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba<u8> {
    let mut channel = || LIGHT_MIN + rng.random_range(0..LIGHT_SPAN);
    Rgba([channel(), channel(), channel(), 255])
}

/// High-contrast foreground color for the challenge glyphs.
///
/// A random color darkened by a shared offset in `[30, 285)`; each channel is
/// `|min(channel - offset, 255)|` truncated to eight bits, so a result above
/// 255 wraps around instead of saturating.
pub fn random_deep_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba<u8> {
    let base = random_color(rng);
    let offset = DEEP_OFFSET_MIN + rng.random_range(0..255);
    let darken = |channel: u8| deep_channel(channel, offset);
    Rgba([darken(base[0]), darken(base[1]), darken(base[2]), 255])
}

fn deep_channel(channel: u8, offset: i32) -> u8 {
    (i32::from(channel) - offset).min(255).abs() as u8
}

/// Dark stroke color for the distortion curve: each channel in `[0, 150)`.
pub fn random_curve_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba<u8> {
    let mut channel = || rng.random_range(0..CURVE_CHANNEL_MAX);
    Rgba([channel(), channel(), channel(), 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_color_energy_cap() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..2000 {
            let c = random_color(&mut rng);
            let (r, g, b) = (i32::from(c[0]), i32::from(c[1]), i32::from(c[2]));
            assert!(r < 255 && g < 255);
            if r + g <= 400 {
                assert_eq!(b, (400 - r - g).min(255));
            } else {
                assert_eq!(b, 0);
            }
            assert_eq!(c[3], 255);
        }
    }

    #[test]
    fn test_random_light_color_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..2000 {
            let c = random_light_color(&mut rng);
            assert!(c.0[..3].iter().all(|&v| (200..255).contains(&v)));
            assert_eq!(c[3], 255);
        }
    }

    #[test]
    fn test_deep_channel_arithmetic() {
        assert_eq!(deep_channel(200, 30), 170);
        assert_eq!(deep_channel(30, 30), 0);
        // Negative results fold back through the absolute value
        assert_eq!(deep_channel(0, 100), 100);
        // and wrap once they pass 255
        assert_eq!(deep_channel(0, 284), 28);
    }

    #[test]
    fn test_random_curve_color_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let c = random_curve_color(&mut rng);
            assert!(c.0[..3].iter().all(|&v| v < 150));
        }
    }

    #[test]
    fn test_random_deep_color_is_opaque() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            assert_eq!(random_deep_color(&mut rng)[3], 255);
        }
    }
}
