use std::fmt;

use super::resolver::{ResolveError, Resolution};
use crate::{
    domain::{BaselineTemplate, RouteParams, WeddingRecord},
    source::Provenance,
};

/// Shown to the viewer when resolution fails unexpectedly.
pub const GENERIC_ERROR_MESSAGE: &str =
    "We couldn't load this wedding invitation. Please try again later.";

/// What the page is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// A resolution is in flight.
    Loading,
    /// A record has been resolved (possibly the baseline).
    Ready,
    /// Resolution failed unexpectedly. The baseline record is still available.
    Error(String),
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("loading"),
            Self::Ready => f.write_str("ready"),
            Self::Error(_) => f.write_str("error"),
        }
    }
}

/// Marks one resolution request. Only the latest one may update the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// The presentation state machine.
///
/// `Loading` is entered on every change of route parameters and left when
/// the resolution for the latest change completes. Results of older
/// resolutions are discarded.
#[derive(Debug, Clone)]
pub struct PageModel {
    latest: Generation,
    pending: Option<Generation>,
    params: Option<RouteParams>,
    state: PageState,
    record: Option<WeddingRecord>,
    provenance: Option<Provenance>,
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PageModel {
    /// A freshly mounted page, loading.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: Generation(0),
            pending: None,
            params: None,
            state: PageState::Loading,
            record: None,
            provenance: None,
        }
    }

    /// Records a navigation.
    ///
    /// Returns the generation the caller must pass to [`Self::complete`], or
    /// `None` if the parameters have not changed and nothing needs resolving.
    pub fn begin(&mut self, params: RouteParams) -> Option<Generation> {
        if self.params.as_ref() == Some(&params) {
            tracing::trace!("Route parameters unchanged");
            return None;
        }

        self.latest = Generation(self.latest.0 + 1);
        self.pending = Some(self.latest);
        self.params = Some(params);
        self.state = PageState::Loading;
        Some(self.latest)
    }

    /// Applies the outcome of the resolution started as `generation`.
    ///
    /// Returns `false`, leaving the page untouched, if a newer navigation has
    /// started since or if this generation was already applied.
    pub fn complete(
        &mut self,
        generation: Generation,
        outcome: Result<Resolution, ResolveError>,
        baseline: &BaselineTemplate,
    ) -> bool {
        if self.pending != Some(generation) {
            tracing::debug!(?generation, latest = ?self.latest, "Discarding stale resolution");
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(resolution) => {
                self.state = PageState::Ready;
                self.record = Some(resolution.record);
                self.provenance = Some(resolution.provenance);
            }
            Err(e) => {
                tracing::error!("Error loading wedding data: {e}");
                self.state = PageState::Error(GENERIC_ERROR_MESSAGE.to_string());
                self.record = Some(baseline.record().clone());
                self.provenance = Some(Provenance::Baseline);
            }
        }
        true
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &PageState {
        &self.state
    }

    /// The record on display, if any has been resolved yet.
    #[must_use]
    pub const fn record(&self) -> Option<&WeddingRecord> {
        self.record.as_ref()
    }

    /// Where the record on display came from.
    #[must_use]
    pub const fn provenance(&self) -> Option<Provenance> {
        self.provenance
    }

    /// The route parameters of the latest navigation.
    #[must_use]
    pub const fn params(&self) -> Option<&RouteParams> {
        self.params.as_ref()
    }
}
