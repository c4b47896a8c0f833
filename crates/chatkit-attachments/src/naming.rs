//! Storage key generation.
//!
//! Keys have the form `{category}/{conversation_id}/{millis}_{token}.{ext}`.
//! Uniqueness is probabilistic (timestamp plus random token, scoped to the
//! conversation); collisions are not checked here and are surfaced by the
//! backend's non-overwriting put instead.

use chatkit_core::{MediaCategory, UploadCandidate};
use rand::distr::{Alphanumeric, SampleString};

const TOKEN_LENGTH: usize = 8;

/// Millisecond clock, injectable so tests can pin timestamps.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Random token source, injectable so tests can pin tokens.
pub trait TokenSource: Send + Sync {
    fn alphanumeric(&self, length: usize) -> String;
}

/// Thread-local RNG token source.
#[derive(Clone, Copy, Default)]
pub struct RandomTokens;

impl TokenSource for RandomTokens {
    fn alphanumeric(&self, length: usize) -> String {
        Alphanumeric.sample_string(&mut rand::rng(), length)
    }
}

/// Derives storage keys for upload candidates.
pub struct KeyGenerator {
    clock: Box<dyn Clock>,
    tokens: Box<dyn TokenSource>,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new(Box::new(SystemClock), Box::new(RandomTokens))
    }
}

impl KeyGenerator {
    pub fn new(clock: Box<dyn Clock>, tokens: Box<dyn TokenSource>) -> Self {
        Self { clock, tokens }
    }

    /// Key for a candidate scoped to a conversation.
    ///
    /// The extension is taken from the original name with its case
    /// preserved. When the name has no extension, the `.` separator is
    /// omitted rather than producing a trailing dot.
    pub fn generate(
        &self,
        category: MediaCategory,
        conversation_id: &str,
        candidate: &UploadCandidate,
    ) -> String {
        let stamp = self.clock.now_millis();
        let token = self.tokens.alphanumeric(TOKEN_LENGTH);
        let extension = candidate.extension();

        if extension.is_empty() {
            format!("{}/{}/{}_{}", category, conversation_id, stamp, token)
        } else {
            format!(
                "{}/{}/{}_{}.{}",
                category, conversation_id, stamp, token, extension
            )
        }
    }
}
