//! Sources that can answer a lookup for a wedding record.
//!
//! A [`Source`] either finds a (possibly partial) record, finds nothing, or
//! fails. The [`SourceChain`] asks the authoritative backend first and the
//! local registry second.

use async_trait::async_trait;

use crate::{
    domain::{LookupKey, PartialWeddingRecord},
    storage::StoreError,
};

mod chain;
mod local;
mod remote;
#[cfg(test)]
pub(crate) mod scripted;

pub use chain::{Found, Provenance, SourceChain};
pub use local::LocalSource;
pub use remote::{RemoteError, RemoteSource};

/// Something that can look up a wedding record.
#[async_trait]
pub trait Source: Send + Sync {
    /// A short name for logging.
    fn name(&self) -> &'static str;

    /// Looks up the record for `key`.
    ///
    /// `Ok(None)` is the normal "not found" outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the source could not be consulted at all.
    async fn lookup(&self, key: &LookupKey) -> Result<Option<PartialWeddingRecord>, SourceError>;
}

/// Why a [`Source`] could not answer.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The backend could not be reached or sent something unusable.
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// The local store could not be read.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
