//! Repository trait for url record storage.

use crate::domain::entities::{UrlPatch, UrlRecord};
use async_trait::async_trait;

/// Failures reported by a [`UrlRepository`].
///
/// A single call yields at most one of these; `AliasExists` is never
/// accompanied by another failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The alias unique constraint rejected the write.
    #[error("alias already exists: {0}")]
    AliasExists(String),

    /// The store could not be reached (pool exhausted or closed, I/O, TLS).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The statement failed for any other reason.
    #[error("store query failed: {0}")]
    Query(String),
}

/// Access contract for url records.
///
/// Every method is a single auto-committed round trip. Connections are held
/// only for the duration of the call; dropping the returned future cancels
/// the statement and releases the connection.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - In-process implementation for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record with `visit_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasExists`] if `alias` is already taken.
    async fn insert(&self, alias: &str, target_url: &str) -> Result<UrlRecord, StoreError>;

    /// Applies the non-`None` fields of `patch` to the record with `id`.
    ///
    /// Returns the number of rows affected; `0` means no such record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasExists`] if the new alias is taken by
    /// another record.
    async fn update(&self, id: i64, patch: UrlPatch) -> Result<u64, StoreError>;

    /// Finds a record by its alias (case-sensitive).
    async fn get_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>, StoreError>;

    /// Atomically adds one to the record's visit counter.
    ///
    /// Returns the number of rows affected; `0` means no such record.
    async fn increment_visit_count(&self, id: i64) -> Result<u64, StoreError>;

    /// Performs a trivial round trip to confirm the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}
