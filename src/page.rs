//! The public wedding page: resolution, presentation state and countdown.
//!
//! A [`WeddingPage`] lives for one page view. Each navigation resolves the
//! route's identifier into a complete record; once a record is on display a
//! [`CountdownClock`] ticks towards the event. Dropping the page stops the
//! clock.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

mod clock;
mod resolver;
mod state;

pub use clock::{CountdownClock, CountdownStatus, ManualClock, SystemClock, TICK, WallClock};
pub use resolver::{ResolveError, Resolution, Resolver};
pub use state::{GENERIC_ERROR_MESSAGE, Generation, PageModel, PageState};

use crate::domain::{RouteParams, WeddingRecord};

/// Read-only data handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct PageView<'a> {
    /// `loading`, `ready` or `error`.
    pub state: String,
    /// The message to show in the `error` state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    /// The record on display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<&'a WeddingRecord>,
    /// Where the record came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// The countdown, once running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown: Option<CountdownStatus>,
}

/// One view of the public wedding page.
#[derive(Debug)]
pub struct WeddingPage {
    resolver: Arc<Resolver>,
    wall_clock: Arc<dyn WallClock>,
    model: PageModel,
    countdown: Option<CountdownClock>,
}

impl WeddingPage {
    /// Mounts a page. It starts out loading.
    #[must_use]
    pub fn new(resolver: Resolver, wall_clock: Arc<dyn WallClock>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            wall_clock,
            model: PageModel::new(),
            countdown: None,
        }
    }

    /// The resolver, for callers that run resolutions themselves and report
    /// back through [`Self::finish_navigation`].
    #[must_use]
    pub fn resolver(&self) -> Arc<Resolver> {
        Arc::clone(&self.resolver)
    }

    /// The presentation state machine.
    #[must_use]
    pub const fn model(&self) -> &PageModel {
        &self.model
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &PageState {
        self.model.state()
    }

    /// The record on display.
    #[must_use]
    pub const fn record(&self) -> Option<&WeddingRecord> {
        self.model.record()
    }

    /// The running countdown, if any.
    #[must_use]
    pub const fn countdown(&self) -> Option<&CountdownClock> {
        self.countdown.as_ref()
    }

    /// A receiver for countdown updates, if a countdown is running.
    #[must_use]
    pub fn subscribe_countdown(&self) -> Option<watch::Receiver<CountdownStatus>> {
        self.countdown.as_ref().map(CountdownClock::subscribe)
    }

    /// Navigates to `params` and resolves the record.
    ///
    /// Does nothing if the parameters have not changed.
    pub async fn navigate(&mut self, params: RouteParams) -> &PageState {
        if let Some(generation) = self.begin_navigation(params.clone()) {
            let outcome = self.resolver.resolve(&params).await;
            self.finish_navigation(generation, outcome);
        }
        self.model.state()
    }

    /// Starts a navigation without resolving; see [`PageModel::begin`].
    pub fn begin_navigation(&mut self, params: RouteParams) -> Option<Generation> {
        self.model.begin(params)
    }

    /// Applies a resolution outcome; see [`PageModel::complete`].
    ///
    /// When the outcome is applied, the countdown restarts against the new
    /// record's event date.
    pub fn finish_navigation(
        &mut self,
        generation: Generation,
        outcome: Result<Resolution, ResolveError>,
    ) -> bool {
        let applied = self
            .model
            .complete(generation, outcome, self.resolver.baseline());
        if applied {
            self.restart_countdown();
        }
        applied
    }

    /// The data the presentation layer renders.
    #[must_use]
    pub fn view(&self) -> PageView<'_> {
        let error = match self.model.state() {
            PageState::Error(message) => Some(message.as_str()),
            _ => None,
        };
        PageView {
            state: self.model.state().to_string(),
            error,
            record: self.model.record(),
            source: self.model.provenance().map(|p| p.to_string()),
            countdown: self.countdown.as_ref().map(CountdownClock::current),
        }
    }

    fn restart_countdown(&mut self) {
        // Release the previous clock before acquiring a new one.
        self.countdown = None;

        let Some(record) = self.model.record() else {
            return;
        };
        match record.event_date() {
            Some(date) => {
                self.countdown = CountdownClock::start(date, Arc::clone(&self.wall_clock));
            }
            None => {
                tracing::warn!(
                    "Unparseable wedding date '{}', countdown disabled",
                    record.wedding_date
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::{
        domain::{BaselineTemplate, PartialWeddingRecord},
        source::{
            SourceChain,
            scripted::{Answer, Scripted},
        },
    };

    fn wall() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 6, 14, 15, 0, 1).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        ))
    }

    fn page(remote: Scripted, local: Scripted) -> WeddingPage {
        let resolver = Resolver::new(
            SourceChain::new(remote, local),
            BaselineTemplate::standard(),
        );
        WeddingPage::new(resolver, wall())
    }

    #[tokio::test(start_paused = true)]
    async fn baseline_only_page_is_ready_with_countdown() {
        let remote = Scripted::new(Answer::Missing);
        let local = Scripted::new(Answer::Missing);
        let mut page = page(remote.clone(), local.clone());
        assert_eq!(page.state(), &PageState::Loading);

        assert_eq!(
            page.navigate(RouteParams::default()).await,
            &PageState::Ready
        );

        assert_eq!(page.record(), Some(BaselineTemplate::standard().record()));
        assert_eq!(remote.calls() + local.calls(), 0);
        let countdown = page.countdown().unwrap().current();
        assert_eq!(countdown.breakdown.hours, 23);
        assert_eq!(countdown.breakdown.seconds, 59);
    }

    #[tokio::test(start_paused = true)]
    async fn unexpected_failure_shows_error_over_baseline() {
        let mut page = page(
            Scripted::new(Answer::RemoteFailure),
            Scripted::new(Answer::StorageFailure),
        );

        let state = page.navigate(RouteParams::with_slug("x")).await.clone();

        assert_eq!(state, PageState::Error(GENERIC_ERROR_MESSAGE.to_string()));
        assert_eq!(page.record(), Some(BaselineTemplate::standard().record()));
        assert!(page.countdown().is_some());
        assert_eq!(page.view().error, Some(GENERIC_ERROR_MESSAGE));
    }

    #[tokio::test(start_paused = true)]
    async fn new_record_restarts_the_countdown() {
        let found: PartialWeddingRecord =
            serde_json::from_value(json!({"wedding_date": "2025-06-16"})).unwrap();
        let mut page = page(
            Scripted::new(Answer::Found(found)),
            Scripted::new(Answer::Missing),
        );

        page.navigate(RouteParams::default()).await;
        let mut first = page.subscribe_countdown().unwrap();

        page.navigate(RouteParams::with_owner_id("u2")).await;

        // The first clock was released.
        assert!(first.changed().await.is_err());
        let countdown = page.countdown().unwrap().current();
        assert_eq!(countdown.breakdown.days, 1);
        assert_eq!(countdown.breakdown.hours, 23);
    }

    #[tokio::test(start_paused = true)]
    async fn unparseable_date_disables_countdown() {
        let found: PartialWeddingRecord =
            serde_json::from_value(json!({"wedding_date": "next spring"})).unwrap();
        let mut page = page(
            Scripted::new(Answer::Found(found)),
            Scripted::new(Answer::Missing),
        );

        assert_eq!(
            page.navigate(RouteParams::with_owner_id("u3")).await,
            &PageState::Ready
        );
        assert!(page.countdown().is_none());
        assert_eq!(page.record().unwrap().wedding_date, "next spring");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_navigation_is_ignored() {
        let mut page = page(Scripted::new(Answer::Missing), Scripted::new(Answer::Missing));
        let resolver = page.resolver();

        let slow = page.begin_navigation(RouteParams::with_slug("first")).unwrap();
        let fast_params = RouteParams::with_owner_id("u5");
        let fast = page.begin_navigation(fast_params.clone()).unwrap();

        let fast_outcome = resolver.resolve(&fast_params).await;
        assert!(page.finish_navigation(fast, fast_outcome));
        let slow_outcome = resolver.resolve(&RouteParams::with_slug("first")).await;
        assert!(!page.finish_navigation(slow, slow_outcome));

        assert_eq!(page.model().params(), Some(&fast_params));
        assert_eq!(page.state(), &PageState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn view_serializes_for_the_shell() {
        let mut page = page(Scripted::new(Answer::Missing), Scripted::new(Answer::Missing));
        page.navigate(RouteParams::default()).await;

        let view = serde_json::to_value(page.view()).unwrap();
        assert_eq!(view["state"], json!("ready"));
        assert_eq!(view["source"], json!("baseline"));
        assert_eq!(view["record"]["couple_name_1"], json!("Sarah"));
        assert_eq!(view["countdown"]["breakdown"]["minutes"], json!(59));
        assert!(view.get("error").is_none());
    }
}
