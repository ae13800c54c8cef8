//! Answer verification.

/// Case-insensitive comparison of a submitted answer against a secret.
///
/// An empty secret never matches: it means nothing was issued.
pub fn verify_text(expected: &str, submitted: &str) -> bool {
    !expected.is_empty() && expected.to_lowercase() == submitted.to_lowercase()
}

/// A generated challenge secret.
///
/// Checking consumes the secret, so each one is compared at most once and is
/// gone afterwards whatever the outcome.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare against a submitted answer, invalidating the secret
    pub fn verify(self, submitted: &str) -> bool {
        verify_text(&self.0, submitted)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}
