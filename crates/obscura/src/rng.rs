//! Jitter helpers over the general-purpose generator.
//!
//! These never touch the secret; see `text` for the cryptographic path.

use rand::Rng;

/// Uniform integer in `[0, n)`, or 0 when the range is empty.
pub fn below<R: Rng + ?Sized>(rng: &mut R, n: u32) -> u32 {
    if n == 0 { 0 } else { rng.random_range(0..n) }
}

fn below_i64<R: Rng + ?Sized>(rng: &mut R, n: i64) -> i64 {
    if n <= 0 { 0 } else { rng.random_range(0..n) }
}

/// Random value between `min` and `max` with a fractional part.
///
/// When the range straddles zero the sign is picked first and the magnitude
/// second, so both halves are equally likely regardless of their widths.
/// An entirely non-positive range is sampled by magnitude and negated.
pub fn signed_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> f64 {
    let decimal: f64 = rng.random();

    if max <= 0 {
        let magnitude = below_i64(rng, max - min) - max;
        return -(magnitude as f64 + decimal);
    }

    if min < 0 {
        return if rng.random_bool(0.5) {
            below_i64(rng, max) as f64 + decimal
        } else {
            -(below_i64(rng, -min) as f64 + decimal)
        };
    }

    (below_i64(rng, max - min) + min) as f64 + decimal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_below_empty_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(below(&mut rng, 0), 0);
        for _ in 0..100 {
            assert!(below(&mut rng, 7) < 7);
        }
    }

    #[test]
    fn test_signed_range_straddling_zero() {
        let mut rng = StdRng::seed_from_u64(2);
        let (mut neg, mut pos) = (0, 0);
        for _ in 0..1000 {
            let v = signed_range(&mut rng, -20, 20);
            assert!((-20.0..21.0).contains(&v), "{v} out of range");
            if v < 0.0 { neg += 1 } else { pos += 1 }
        }
        assert!(neg > 300 && pos > 300);
    }

    #[test]
    fn test_signed_range_positive() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let v = signed_range(&mut rng, 80, 120);
            assert!((80.0..121.0).contains(&v));
        }
    }

    #[test]
    fn test_signed_range_non_positive() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..1000 {
            let v = signed_range(&mut rng, -30, -10);
            assert!(v <= -10.0 && v > -31.0, "{v} out of range");
        }
    }

    #[test]
    fn test_signed_range_degenerate() {
        let mut rng = StdRng::seed_from_u64(5);
        let v = signed_range(&mut rng, 40, 40);
        assert!((40.0..41.0).contains(&v));
        let v = signed_range(&mut rng, 0, 0);
        assert!(v <= 0.0 && v > -1.0);
    }
}
