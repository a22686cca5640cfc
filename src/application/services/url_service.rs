//! Create, update and resolve operations for url records.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use validator::Validate;

use crate::domain::entities::{NewUrl, UrlChanges, UrlPatch, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::domain::visit_event::VisitEvent;
use crate::error::UrlError;
use crate::utils::alias_generator::{AliasGenerator, DEFAULT_ALIAS_LENGTH};

pub type CreateResult = Result<UrlRecord, UrlError>;
pub type UpdateResult = Result<(), UrlError>;
pub type ResolveResult = Result<String, UrlError>;

/// Generated alias length and how many collisions to tolerate per create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasPolicy {
    pub length: usize,
    pub max_attempts: usize,
}

impl Default for AliasPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_ALIAS_LENGTH,
            max_attempts: 10,
        }
    }
}

/// Orchestrates validation, alias generation and storage for url records.
///
/// Holds no mutable state of its own. Uniqueness is decided by the store and
/// visit counting is delegated to the visit worker through `visits`.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    generator: Arc<dyn AliasGenerator>,
    policy: AliasPolicy,
    visits: mpsc::Sender<VisitEvent>,
}

impl UrlService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn AliasGenerator>,
        policy: AliasPolicy,
        visits: mpsc::Sender<VisitEvent>,
    ) -> Self {
        Self {
            repository,
            generator,
            policy,
            visits,
        }
    }

    /// Creates a record, generating an alias when none is supplied.
    ///
    /// # Errors
    ///
    /// - [`UrlError::Validation`] before any store call if the input is invalid
    /// - [`UrlError::Conflict`] if a supplied alias is taken
    /// - [`UrlError::Internal`] on store failure or when every generated
    ///   alias collided
    #[tracing::instrument(skip_all, fields(alias = new_url.alias.as_deref()))]
    pub async fn create(&self, new_url: NewUrl) -> CreateResult {
        new_url.validate()?;

        match new_url.alias {
            Some(alias) => Ok(self.repository.insert(&alias, &new_url.target_url).await?),
            None => self.insert_generated(&new_url.target_url).await,
        }
    }

    async fn insert_generated(&self, target_url: &str) -> CreateResult {
        for attempt in 1..=self.policy.max_attempts {
            let alias = self.generator.generate(self.policy.length);

            match self.repository.insert(&alias, target_url).await {
                Ok(record) => return Ok(record),
                Err(StoreError::AliasExists(_)) => {
                    metrics::counter!("alias_collisions_total").increment(1);
                    tracing::debug!(attempt, %alias, "Generated alias already taken");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(UrlError::Internal(format!(
            "no free alias after {} attempts",
            self.policy.max_attempts
        )))
    }

    /// Applies a partial update to the record with the given id.
    ///
    /// The visit counter is never written here.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update(&self, id: i64, changes: UrlChanges) -> UpdateResult {
        changes.validate()?;

        if changes.is_empty() {
            tracing::debug!("Update carries no changes");
        }

        let rows = self.repository.update(id, UrlPatch::from(changes)).await?;
        if rows == 0 {
            return Err(UrlError::NotFound);
        }

        Ok(())
    }

    /// Looks up the target for `alias` and queues a visit.
    ///
    /// The visit is best effort: a full or closed queue drops it without
    /// affecting the result.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, alias: &str) -> ResolveResult {
        let record = self
            .repository
            .get_by_alias(alias)
            .await?
            .ok_or(UrlError::NotFound)?;

        match self.visits.try_send(VisitEvent::new(record.id, record.alias)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("visit_events_dropped_total").increment(1);
                tracing::warn!(url_id = event.url_id, "Visit queue full, dropping visit");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("visit_events_dropped_total").increment(1);
                tracing::warn!(url_id = event.url_id, "Visit queue closed, dropping visit");
            }
        }

        Ok(record.target_url)
    }
}
