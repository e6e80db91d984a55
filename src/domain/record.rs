use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The wire format of [`WeddingRecord::wedding_date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One entry in a couple's story timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryMoment {
    /// Free-form year label, e.g. `2019`.
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
    /// Short headline for the moment.
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    /// Narrative text.
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    /// Image reference (usually a URL).
    #[serde(deserialize_with = "lenient_string")]
    pub image: String,
}

/// One entry in the wedding day schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleEntry {
    /// Start time label, e.g. `3:00 PM`.
    #[serde(deserialize_with = "lenient_string")]
    pub time: String,
    /// Short headline for the entry.
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    /// What happens during this entry.
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    /// Where it happens.
    #[serde(deserialize_with = "lenient_string")]
    pub location: String,
    /// Icon key, resolved by the presentation layer.
    #[serde(deserialize_with = "lenient_string")]
    pub icon: String,
    /// Duration label, e.g. `45 minutes`.
    #[serde(deserialize_with = "lenient_string")]
    pub duration: String,
    /// Whether the entry is the main event of the day.
    #[serde(skip_serializing_if = "is_false", deserialize_with = "lenient_bool")]
    pub highlight: bool,
}

const fn is_false(value: &bool) -> bool {
    !*value
}

/// Timeline and schedule entries are stored untyped, so a label may arrive as
/// `null`, a number or a boolean. `null` and nested values read as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Only `true`, `"true"` or a non-zero number set a flag.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text.trim().eq_ignore_ascii_case("true"),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    })
}

/// A complete wedding record, as handed to the presentation layer.
///
/// Every field is populated. Records built by the resolver always pass through
/// [`merge`](crate::domain::merge), which fills gaps from the baseline
/// template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeddingRecord {
    /// The stable, system-assigned owner identifier.
    #[serde(rename = "user_id")]
    pub owner_id: String,
    /// The human-chosen public alias, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    /// First participant's name.
    pub couple_name_1: String,
    /// Second participant's name.
    pub couple_name_2: String,
    /// Calendar date of the event, `YYYY-MM-DD`.
    pub wedding_date: String,
    /// Venue name.
    pub venue_name: String,
    /// Free-text location string.
    pub venue_location: String,
    /// Narrative text.
    pub their_story: String,
    /// Theme key, resolved by a [`ThemeProvider`](crate::domain::ThemeProvider).
    pub theme: String,
    /// Ordered story timeline.
    pub story_timeline: Vec<StoryMoment>,
    /// Ordered schedule.
    pub schedule_events: Vec<ScheduleEntry>,
    /// Sections the baseline does not define (gallery, FAQs, registry, ...),
    /// carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl WeddingRecord {
    /// Parses [`Self::wedding_date`].
    ///
    /// Returns `None` if the stored string is not a `YYYY-MM-DD` date.
    #[must_use]
    pub fn event_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.wedding_date.trim(), DATE_FORMAT).ok()
    }

    /// The long display form of the event date, e.g. `Sunday, June 15, 2025`.
    ///
    /// Falls back to the raw string when it cannot be parsed.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.event_date().map_or_else(
            || self.wedding_date.clone(),
            |date| date.format("%A, %B %-d, %Y").to_string(),
        )
    }

    /// Both participant names joined for display.
    #[must_use]
    pub fn couple(&self) -> String {
        format!("{} & {}", self.couple_name_1, self.couple_name_2)
    }
}

/// A wedding record as found in a source, where any field may be absent.
///
/// Absent and `null` are treated the same: both mean "use the baseline".
/// An explicitly empty string or list is present and wins over the baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialWeddingRecord {
    /// Owner identifier, if the source included it.
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    /// Public alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    /// First participant's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couple_name_1: Option<String>,
    /// Second participant's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub couple_name_2: Option<String>,
    /// Calendar date of the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wedding_date: Option<String>,
    /// Venue name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    /// Free-text location string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_location: Option<String>,
    /// Narrative text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_story: Option<String>,
    /// Theme key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Story timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_timeline: Option<Vec<StoryMoment>>,
    /// Schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_events: Option<Vec<ScheduleEntry>>,
    /// Every other field the source sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PartialWeddingRecord {
    /// The backend's own record id (`id`), which is not the owner id.
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        self.extra.get("id").and_then(Value::as_str)
    }

    /// Fills in the owner id when the source omitted it.
    #[must_use]
    pub fn with_owner_fallback(mut self, owner_id: impl Into<String>) -> Self {
        if self.owner_id.is_none() {
            self.owner_id = Some(owner_id.into());
        }
        self
    }

    /// Returns `true` if this record is reachable under `key`, either as its
    /// owner id or as its public alias.
    #[must_use]
    pub fn answers_to(&self, owner_id: &str, key: &str) -> bool {
        owner_id == key || self.custom_url.as_deref() == Some(key)
    }
}

impl From<WeddingRecord> for PartialWeddingRecord {
    fn from(record: WeddingRecord) -> Self {
        Self {
            owner_id: Some(record.owner_id),
            custom_url: record.custom_url,
            couple_name_1: Some(record.couple_name_1),
            couple_name_2: Some(record.couple_name_2),
            wedding_date: Some(record.wedding_date),
            venue_name: Some(record.venue_name),
            venue_location: Some(record.venue_location),
            their_story: Some(record.their_story),
            theme: Some(record.theme),
            story_timeline: Some(record.story_timeline),
            schedule_events: Some(record.schedule_events),
            extra: record.extra,
        }
    }
}
