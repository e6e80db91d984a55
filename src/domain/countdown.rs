use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// The local hour at which every event starts.
pub const EVENT_START_HOUR: u32 = 15;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_DAY: u64 = 86_400_000;

/// The local wall-clock instant an event on `date` starts.
#[must_use]
pub fn event_start(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(EVENT_START_HOUR, 0, 0)
}

/// Time remaining until an event, split into display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountdownBreakdown {
    /// Whole days.
    pub days: u64,
    /// Hours past the whole days, `0..24`.
    pub hours: u64,
    /// Minutes past the whole hours, `0..60`.
    pub minutes: u64,
    /// Seconds past the whole minutes, `0..60`.
    pub seconds: u64,
}

impl CountdownBreakdown {
    /// Splits a distance in milliseconds.
    ///
    /// Returns `None` when the distance is zero or negative.
    #[must_use]
    pub fn from_millis(distance_ms: i64) -> Option<Self> {
        let distance = u64::try_from(distance_ms).ok().filter(|ms| *ms > 0)?;

        Some(Self {
            days: distance / MS_PER_DAY,
            hours: (distance % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (distance % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (distance % MS_PER_MINUTE) / MS_PER_SECOND,
        })
    }

    /// Time remaining from `now` until `event`, or `None` once it has begun.
    #[must_use]
    pub fn until(event: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        Self::from_millis((event - now).num_milliseconds())
    }

    /// Whether the countdown section is worth showing (at least a day left).
    #[must_use]
    pub const fn is_displayable(&self) -> bool {
        self.days > 0
    }
}
