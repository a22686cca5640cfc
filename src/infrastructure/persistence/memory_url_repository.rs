//! In-process url repository backed by `DashMap`.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{UrlPatch, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};

/// In-memory implementation of [`UrlRepository`].
///
/// `aliases` is the uniqueness authority: an alias is claimed through its
/// entry before the record becomes visible. Guards on `records` may be held
/// while touching `aliases`, never the other way round.
#[derive(Debug)]
pub struct InMemoryUrlRepository {
    records: DashMap<i64, UrlRecord>,
    aliases: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            aliases: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, alias: &str, target_url: &str) -> Result<UrlRecord, StoreError> {
        let id = match self.aliases.entry(alias.to_string()) {
            Entry::Occupied(_) => return Err(StoreError::AliasExists(alias.to_string())),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                slot.insert(id);
                id
            }
        };

        let record = UrlRecord::new(
            id,
            alias.to_string(),
            target_url.to_string(),
            0,
            Utc::now(),
        );
        self.records.insert(id, record.clone());

        Ok(record)
    }

    async fn update(&self, id: i64, patch: UrlPatch) -> Result<u64, StoreError> {
        let Some(mut record) = self.records.get_mut(&id) else {
            return Ok(0);
        };

        if let Some(alias) = patch.alias.filter(|a| *a != record.alias) {
            match self.aliases.entry(alias.clone()) {
                Entry::Occupied(_) => return Err(StoreError::AliasExists(alias)),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.aliases.remove(&record.alias);
            record.alias = alias;
        }

        if let Some(target_url) = patch.target_url {
            record.target_url = target_url;
        }

        if let Some(visit_count) = patch.visit_count {
            record.visit_count = visit_count;
        }

        Ok(1)
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>, StoreError> {
        let Some(id) = self.aliases.get(alias).map(|entry| *entry) else {
            return Ok(None);
        };

        Ok(self.records.get(&id).map(|record| record.clone()))
    }

    async fn increment_visit_count(&self, id: i64) -> Result<u64, StoreError> {
        match self.records.get_mut(&id) {
            Some(mut record) => {
                record.visit_count += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
