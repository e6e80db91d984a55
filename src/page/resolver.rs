use tracing::instrument;

use crate::{
    domain::{BaselineTemplate, Config, LookupKey, RouteParams, WeddingRecord, merge},
    source::{Found, LocalSource, Provenance, RemoteError, RemoteSource, SourceChain, SourceError},
    storage::DirectoryStore,
};

/// A fully merged record and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The key that was looked up, if the route carried one.
    pub key: Option<LookupKey>,
    /// Which source supplied the record.
    pub provenance: Provenance,
    /// The complete record.
    pub record: WeddingRecord,
}

/// A resolution failed in a way the source chain could not absorb.
#[derive(Debug, thiserror::Error)]
#[error("failed to resolve wedding record for {key}")]
pub struct ResolveError {
    key: LookupKey,
    #[source]
    source: SourceError,
}

impl ResolveError {
    /// The key whose resolution failed.
    #[must_use]
    pub const fn key(&self) -> &LookupKey {
        &self.key
    }
}

/// Turns route parameters into a complete [`WeddingRecord`].
#[derive(Debug)]
pub struct Resolver {
    chain: SourceChain,
    baseline: BaselineTemplate,
}

impl Resolver {
    /// Creates a resolver from a source chain and the baseline to merge over.
    #[must_use]
    pub const fn new(chain: SourceChain, baseline: BaselineTemplate) -> Self {
        Self { chain, baseline }
    }

    /// Builds the standard pipeline: the configured backend, then the local
    /// registry in the configured data directory, over the standard baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is unusable.
    pub fn from_config(config: &Config) -> Result<Self, RemoteError> {
        let remote = RemoteSource::new(config.backend_url(), config.request_timeout())?;
        let local = LocalSource::new(DirectoryStore::new(config.data_dir().to_path_buf()));
        Ok(Self::new(
            SourceChain::new(remote, local),
            BaselineTemplate::standard(),
        ))
    }

    /// The baseline records are merged over.
    #[must_use]
    pub const fn baseline(&self) -> &BaselineTemplate {
        &self.baseline
    }

    /// Resolves the record for a route.
    ///
    /// Routes without an identifier resolve to the baseline without touching
    /// any source. A key that no source knows also resolves to the baseline.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures the source chain does not absorb,
    /// such as an unreadable local store.
    #[instrument(level = "debug", skip(self))]
    pub async fn resolve(&self, params: &RouteParams) -> Result<Resolution, ResolveError> {
        let Some(key) = params.lookup_key() else {
            tracing::debug!("No identifier in route, using baseline");
            return Ok(Resolution {
                key: None,
                provenance: Provenance::Baseline,
                record: self.baseline.record().clone(),
            });
        };

        let found = self
            .chain
            .resolve(&key)
            .await
            .map_err(|source| ResolveError {
                key: key.clone(),
                source,
            })?;

        let (provenance, found) = match found {
            Some(Found { provenance, record }) => (provenance, Some(record)),
            None => {
                tracing::info!("No record for {key}, using baseline");
                (Provenance::Baseline, None)
            }
        };

        Ok(Resolution {
            key: Some(key),
            provenance,
            record: merge(found, &self.baseline),
        })
    }
}
