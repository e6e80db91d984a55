//! Sources with canned answers, for tests.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use super::{RemoteError, Source, SourceError};
use crate::{
    domain::{LookupKey, PartialWeddingRecord},
    storage::StoreError,
};

#[derive(Debug, Clone)]
pub(crate) enum Answer {
    Found(PartialWeddingRecord),
    Missing,
    RemoteFailure,
    StorageFailure,
}

/// Always gives the same answer and counts how often it was asked.
#[derive(Debug, Clone)]
pub(crate) struct Scripted {
    answer: Answer,
    calls: Arc<AtomicUsize>,
}

impl Scripted {
    pub(crate) fn new(answer: Answer) -> Self {
        Self {
            answer,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Source for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn lookup(&self, _key: &LookupKey) -> Result<Option<PartialWeddingRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Answer::Found(record) => Ok(Some(record.clone())),
            Answer::Missing => Ok(None),
            Answer::RemoteFailure => Err(RemoteError::InvalidUrl {
                url: "http://unreachable".to_string(),
                reason: "connection refused".to_string(),
            }
            .into()),
            Answer::StorageFailure => Err(StoreError::Io {
                key: "wedding_users".to_string(),
                source: io::Error::other("disk on fire"),
            }
            .into()),
        }
    }
}
