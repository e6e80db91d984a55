//! The ticking countdown shown once a record is on screen.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};

use crate::domain::{CountdownBreakdown, countdown::event_start};

/// How often the countdown is recomputed.
pub const TICK: Duration = Duration::from_secs(1);

/// A source of wall-clock time and of the local timezone.
pub trait WallClock: fmt::Debug + Send + Sync + 'static {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The instant a local wall-clock time refers to, or `None` if it does
    /// not exist locally (e.g. skipped by a DST change).
    fn localize(&self, local: NaiveDateTime) -> Option<DateTime<Utc>>;
}

/// The system clock in the system timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn localize(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        Local
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// A clock that only moves when told to, in a fixed timezone.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Creates a clock stopped at `now`, interpreting local times in `offset`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            now: Mutex::new(now),
            offset,
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn localize(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// What the countdown currently shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountdownStatus {
    /// The last computed breakdown.
    ///
    /// Once the event has started this stays at its last value.
    pub breakdown: CountdownBreakdown,
    /// Whether the event start has been reached.
    pub started: bool,
}

impl CountdownStatus {
    /// The status after one tick at `now`.
    #[must_use]
    pub fn advance(self, event: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        match CountdownBreakdown::until(event, now) {
            Some(breakdown) => Self {
                breakdown,
                started: false,
            },
            None => Self {
                breakdown: self.breakdown,
                started: true,
            },
        }
    }
}

/// A running countdown to an event.
///
/// The countdown task is stopped when this value is dropped.
pub struct CountdownClock {
    event: DateTime<Utc>,
    status: watch::Receiver<CountdownStatus>,
    task: JoinHandle<()>,
}

impl fmt::Debug for CountdownClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownClock")
            .field("event", &self.event)
            .field("status", &*self.status.borrow())
            .finish_non_exhaustive()
    }
}

impl CountdownClock {
    /// Starts counting down to the event on `date`.
    ///
    /// Returns `None` if the event start does not exist in the clock's
    /// timezone.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(date: NaiveDate, clock: Arc<dyn WallClock>) -> Option<Self> {
        let event = event_start(date).and_then(|local| clock.localize(local))?;

        let initial = CountdownStatus::default().advance(event, clock.now());
        let (tx, status) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let now = clock.now();
                tx.send_if_modified(|status| {
                    let next = status.advance(event, now);
                    let changed = next != *status;
                    *status = next;
                    changed
                });
            }
        });

        tracing::debug!(%event, "Countdown started");
        Some(Self {
            event,
            status,
            task,
        })
    }

    /// The instant being counted down to.
    #[must_use]
    pub const fn event(&self) -> DateTime<Utc> {
        self.event
    }

    /// The latest status.
    #[must_use]
    pub fn current(&self) -> CountdownStatus {
        *self.status.borrow()
    }

    /// A receiver notified on every change.
    ///
    /// The receiver reports the channel closed once the clock is dropped.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CountdownStatus> {
        self.status.clone()
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.task.abort();
        tracing::trace!(event = %self.event, "Countdown stopped");
    }
}
