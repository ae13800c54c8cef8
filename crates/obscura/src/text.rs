//! Challenge text generation.

use obscura_common::constants::ALPHANUMERIC;
use obscura_common::{CaptchaError, Result};
use rand::TryCryptoRng;

/// Largest multiple of the alphabet size representable in a `u32`;
/// draws at or above it are rejected to keep the selection unbiased.
const ACCEPT_BELOW: u32 = (u32::MAX / ALPHANUMERIC.len() as u32) * ALPHANUMERIC.len() as u32;

/// Generate `n` characters uniformly from the 62-symbol alphabet.
///
/// Only cryptographically strong sources are accepted. A failing source
/// surfaces as [`CaptchaError::Randomness`]; there is no fallback.
pub fn generate_text<R>(rng: &mut R, n: usize) -> Result<String>
where
    R: TryCryptoRng + ?Sized,
{
    if n == 0 {
        return Err(CaptchaError::InvalidInput(
            "text length must be positive".to_string(),
        ));
    }

    (0..n).map(|_| generate_symbol(rng)).collect()
}

/// One character drawn uniformly from the 62-symbol alphabet.
pub fn generate_symbol<R>(rng: &mut R) -> Result<char>
where
    R: TryCryptoRng + ?Sized,
{
    let value = loop {
        let v = rng
            .try_next_u32()
            .map_err(|e| CaptchaError::Randomness(format!("read entropy: {e}")))?;
        if v < ACCEPT_BELOW {
            break v;
        }
    };
    Ok(ALPHANUMERIC[(value % ALPHANUMERIC.len() as u32) as usize] as char)
}

/// Returns true if every character belongs to the challenge alphabet
pub fn is_challenge_text(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| ALPHANUMERIC.contains(&b))
}
