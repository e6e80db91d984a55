use std::fmt;

use super::{Source, SourceError};
use crate::domain::{LookupKey, PartialWeddingRecord};

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The authoritative backend.
    Backend,
    /// The local fallback registry.
    LocalRegistry,
    /// Nothing was found; the record is the baseline.
    Baseline,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend => f.write_str("backend"),
            Self::LocalRegistry => f.write_str("local registry"),
            Self::Baseline => f.write_str("baseline"),
        }
    }
}

/// A record found by one of the sources in a [`SourceChain`].
#[derive(Debug, Clone, PartialEq)]
pub struct Found {
    /// Which source answered.
    pub provenance: Provenance,
    /// The record as the source had it.
    pub record: PartialWeddingRecord,
}

/// The ordered lookup: authoritative source first, fallback second.
///
/// The fallback is only consulted when the authoritative source finds nothing
/// or fails. Failures of the authoritative source are logged and swallowed;
/// failures of the fallback are returned.
pub struct SourceChain {
    remote: Box<dyn Source>,
    fallback: Box<dyn Source>,
}

impl fmt::Debug for SourceChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceChain")
            .field("remote", &self.remote.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl SourceChain {
    /// Creates a chain from an authoritative source and a fallback.
    pub fn new(remote: impl Source + 'static, fallback: impl Source + 'static) -> Self {
        Self {
            remote: Box::new(remote),
            fallback: Box::new(fallback),
        }
    }

    /// Looks `key` up in order, returning the first record found.
    ///
    /// # Errors
    ///
    /// Returns an error only if the fallback source fails.
    pub async fn resolve(&self, key: &LookupKey) -> Result<Option<Found>, SourceError> {
        match self.remote.lookup(key).await {
            Ok(Some(record)) => {
                tracing::info!("Found {key} via {}", self.remote.name());
                return Ok(Some(Found {
                    provenance: Provenance::Backend,
                    record,
                }));
            }
            Ok(None) => {
                tracing::debug!("{} has nothing for {key}", self.remote.name());
            }
            Err(e) => {
                tracing::warn!(
                    "{} lookup for {key} failed, trying {}: {e}",
                    self.remote.name(),
                    self.fallback.name()
                );
            }
        }

        let found = self.fallback.lookup(key).await?;
        match &found {
            Some(_) => tracing::info!("Found {key} via {}", self.fallback.name()),
            None => tracing::debug!("{} has nothing for {key}", self.fallback.name()),
        }

        Ok(found.map(|record| Found {
            provenance: Provenance::LocalRegistry,
            record,
        }))
    }
}
