use async_trait::async_trait;

use super::{Source, SourceError};
use crate::{
    domain::{LookupKey, PartialWeddingRecord},
    storage::{KeyValueStore, Registry},
};

/// The locally persisted registry, consulted when the backend has nothing.
///
/// Both key kinds are matched the same way: against owner ids and against
/// each record's custom slug.
#[derive(Debug, Clone)]
pub struct LocalSource<S> {
    registry: Registry<S>,
}

impl<S: KeyValueStore> LocalSource<S> {
    /// Creates a source reading from `store`.
    pub const fn new(store: S) -> Self {
        Self {
            registry: Registry::new(store),
        }
    }

    /// The registry being scanned.
    pub const fn registry(&self) -> &Registry<S> {
        &self.registry
    }
}

#[async_trait]
impl<S: KeyValueStore> Source for LocalSource<S> {
    fn name(&self) -> &'static str {
        "local registry"
    }

    async fn lookup(&self, key: &LookupKey) -> Result<Option<PartialWeddingRecord>, SourceError> {
        Ok(self.registry.find(key.as_str())?)
    }
}
