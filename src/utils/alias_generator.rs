//! Random alias generation and caller-supplied alias rules.
//!
//! Generated aliases are drawn from the 62-character alphanumeric alphabet.
//! They carry no uniqueness guarantee; the store's unique constraint decides,
//! and [`crate::application::services::UrlService`] retries on collision.

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Alias length used when none is configured.
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Longest alias accepted from callers and from configuration.
pub const MAX_ALIAS_LENGTH: usize = 32;

/// Aliases that would shadow service routes.
const RESERVED_ALIASES: &[&str] = &["url", "health"];

/// Characters allowed in caller-supplied aliases.
pub static ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Source of candidate aliases.
///
/// Implementations are pure and hold no shared mutable state, so a single
/// instance may be used from any number of concurrent requests.
#[cfg_attr(test, mockall::automock)]
pub trait AliasGenerator: Send + Sync {
    /// Produces a candidate alias of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Generates aliases from the thread-local CSPRNG.
///
/// With the default length of 6 the keyspace is 62^6 (about 5.6 * 10^10).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAliasGenerator;

impl AliasGenerator for RandomAliasGenerator {
    fn generate(&self, length: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }
}

/// Rejects aliases that collide with fixed routes.
///
/// Used as a `validator` custom rule; the violation code is `reserved`.
pub fn reject_reserved_alias(alias: &str) -> Result<(), ValidationError> {
    if RESERVED_ALIASES.contains(&alias) {
        return Err(ValidationError::new("reserved"));
    }
    Ok(())
}
