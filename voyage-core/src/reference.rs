use rand::distributions::Alphanumeric;
use rand::Rng;

/// Source of external-facing booking codes.
pub trait ReferenceGenerator: Send + Sync {
    fn next_ref(&self) -> String;
}

/// Default code length. 22 alphanumerics carry ~131 bits of entropy.
pub const DEFAULT_REFERENCE_LENGTH: usize = 22;

/// Draws references uniformly from `[A-Za-z0-9]` using the thread-local CSPRNG.
#[derive(Debug, Clone)]
pub struct RandomReferenceGenerator {
    length: usize,
}

impl RandomReferenceGenerator {
    pub fn new() -> Self {
        Self::with_length(DEFAULT_REFERENCE_LENGTH)
    }

    pub fn with_length(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomReferenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceGenerator for RandomReferenceGenerator {
    fn next_ref(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}
