//! Domain models for public wedding pages.
//!
//! This module contains the core domain types: the wedding record and its
//! partial form, the baseline template, identifier extraction, the merge
//! policy, countdown arithmetic, themes, and configuration.

/// Wedding record types.
pub mod record;
pub use record::{PartialWeddingRecord, ScheduleEntry, StoryMoment, WeddingRecord};

pub mod baseline;
pub use baseline::BaselineTemplate;

/// Route parameters and lookup keys.
pub mod identifier;
pub use identifier::{KeyKind, LookupKey, RouteParams};

mod merge;
pub use merge::merge;

/// Time remaining until the event.
pub mod countdown;
pub use countdown::CountdownBreakdown;

mod theme;
pub use theme::{DEFAULT_THEME, Palette, ThemeProvider, ThemeRegistry, select_theme};

mod config;
pub use config::{Config, DEFAULT_BACKEND_URL};
