//! The local registry of owners and their persisted wedding records.

use serde_json::{Map, Value};

use super::store::{KeyValueStore, StoreError};
use crate::domain::PartialWeddingRecord;

/// Storage key of the owner registry, a JSON object keyed by owner id.
pub const USERS_KEY: &str = "wedding_users";

/// Storage key of the record persisted for `owner_id`.
#[must_use]
pub fn record_key(owner_id: &str) -> String {
    format!("wedding_data_{owner_id}")
}

/// Reads the owner registry and per-owner records out of a [`KeyValueStore`].
///
/// Malformed entries are skipped with a warning rather than failing the scan.
/// Only storage failures are returned as errors.
#[derive(Debug, Clone)]
pub struct Registry<S> {
    store: S,
}

impl<S: KeyValueStore> Registry<S> {
    /// Wraps a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Owner ids listed in the registry, in no meaningful order.
    ///
    /// An absent or malformed registry lists no owners.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn owner_ids(&self) -> Result<Vec<String>, StoreError> {
        let Some(raw) = self.store.get_item(USERS_KEY)? else {
            tracing::debug!("No owner registry found");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(users) => Ok(users.into_iter().map(|(owner_id, _)| owner_id).collect()),
            Err(e) => {
                tracing::warn!("Ignoring malformed owner registry: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Loads the record persisted for `owner_id`.
    ///
    /// Returns `None` if there is no record, or if it is malformed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load_record(&self, owner_id: &str) -> Result<Option<PartialWeddingRecord>, StoreError> {
        let key = record_key(owner_id);
        let raw = match self.store.get_item(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(StoreError::InvalidKey(key)) => {
                tracing::warn!("Skipping owner with unusable storage key '{key}'");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str::<PartialWeddingRecord>(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!("Skipping malformed record '{key}': {e}");
                Ok(None)
            }
        }
    }

    /// Finds the first record whose owner id or custom slug equals `key`.
    ///
    /// The scan is linear over the registry and stops at the first match.
    /// The returned record always carries its owner id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn find(&self, key: &str) -> Result<Option<PartialWeddingRecord>, StoreError> {
        for owner_id in self.owner_ids()? {
            let Some(record) = self.load_record(&owner_id)? else {
                continue;
            };

            if record.answers_to(&owner_id, key) {
                tracing::debug!("Matched '{key}' against local owner '{owner_id}'");
                return Ok(Some(record.with_owner_fallback(owner_id)));
            }
            tracing::trace!("Local owner '{owner_id}' does not match '{key}'");
        }

        Ok(None)
    }
}
