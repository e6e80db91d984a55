use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::{Source, SourceError};
use crate::domain::{KeyKind, LookupKey, PartialWeddingRecord};

/// Errors raised while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The configured base URL is not usable.
    #[error("invalid backend url '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The HTTP client could not be built.
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
    /// The request did not complete.
    #[error("request to {url} failed")]
    Transport {
        /// The requested URL.
        url: String,
        /// The underlying failure.
        #[source]
        source: reqwest::Error,
    },
    /// A successful response did not hold a wedding record.
    #[error("response from {url} is not a wedding record")]
    Decode {
        /// The requested URL.
        url: String,
        /// The underlying failure.
        #[source]
        source: reqwest::Error,
    },
}

/// The authoritative backend.
///
/// Slugs are looked up at `{base}/api/wedding/public/custom/{slug}` and owner
/// ids at `{base}/api/wedding/public/user/{owner}`. Any non-success status is
/// "not found".
#[derive(Debug, Clone)]
pub struct RemoteSource {
    base_url: Url,
    http: reqwest::Client,
}

impl RemoteSource {
    /// Creates a source for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or cannot carry a path, or
    /// if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let trimmed = base_url.trim();
        let parsed = Url::parse(trimmed).map_err(|e| RemoteError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl {
                url: trimmed.to_string(),
                reason: "not a base url".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self {
            base_url: parsed,
            http,
        })
    }

    /// The endpoint queried for `key`.
    #[must_use]
    pub fn endpoint(&self, key: &LookupKey) -> Url {
        let collection = match key.kind() {
            KeyKind::Slug => "custom",
            KeyKind::OwnerId => "user",
        };

        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "wedding", "public", collection, key.as_str()]);
        }
        url
    }

    async fn fetch(&self, key: &LookupKey) -> Result<Option<PartialWeddingRecord>, RemoteError> {
        let url = self.endpoint(key);
        tracing::debug!(%url, "Querying backend for {key}");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| RemoteError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "Backend has no record for {key}");
            return Ok(None);
        }

        let record: PartialWeddingRecord =
            response
                .json()
                .await
                .map_err(|source| RemoteError::Decode {
                    url: url.to_string(),
                    source,
                })?;

        // The public endpoints strip the owner id.
        let record = match key.kind() {
            KeyKind::OwnerId => record.with_owner_fallback(key.as_str()),
            KeyKind::Slug => match record.record_id().map(str::to_string) {
                Some(id) => record.with_owner_fallback(id),
                None => record,
            },
        };

        Ok(Some(record))
    }
}

#[async_trait]
impl Source for RemoteSource {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn lookup(&self, key: &LookupKey) -> Result<Option<PartialWeddingRecord>, SourceError> {
        Ok(self.fetch(key).await?)
    }
}
