//! The baseline template every resolved record is merged over.

use std::{collections::BTreeMap, ops::Deref, sync::Arc};

use super::record::{ScheduleEntry, StoryMoment, WeddingRecord};

/// Owner id carried by the standard baseline template.
pub const BASELINE_OWNER_ID: &str = "demo";

/// A complete, immutable [`WeddingRecord`] used to fill gaps in partial data.
///
/// Cloning is cheap; all clones share the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineTemplate(Arc<WeddingRecord>);

impl BaselineTemplate {
    /// Wraps a complete record as a baseline.
    #[must_use]
    pub fn new(record: WeddingRecord) -> Self {
        Self(Arc::new(record))
    }

    /// The demo invitation shown when nothing else is available.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(WeddingRecord {
            owner_id: BASELINE_OWNER_ID.to_string(),
            custom_url: None,
            couple_name_1: "Sarah".to_string(),
            couple_name_2: "Michael".to_string(),
            wedding_date: "2025-06-15".to_string(),
            venue_name: "Sunset Garden Estate".to_string(),
            venue_location: "Sunset Garden Estate • Napa Valley, California".to_string(),
            their_story: "We can't wait to celebrate our love story with the people who matter \
                          most to us. Join us for an unforgettable evening of joy, laughter, and \
                          new beginnings."
                .to_string(),
            theme: "classic".to_string(),
            story_timeline: standard_timeline(),
            schedule_events: standard_schedule(),
            extra: BTreeMap::new(),
        })
    }

    /// The wrapped record.
    #[must_use]
    pub fn record(&self) -> &WeddingRecord {
        &self.0
    }
}

impl Default for BaselineTemplate {
    fn default() -> Self {
        Self::standard()
    }
}

impl Deref for BaselineTemplate {
    type Target = WeddingRecord;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn moment(year: &str, title: &str, description: &str, image: &str) -> StoryMoment {
    StoryMoment {
        year: year.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
    }
}

fn standard_timeline() -> Vec<StoryMoment> {
    vec![
        moment(
            "2019",
            "First Meeting",
            "We met at a coffee shop in downtown San Francisco on a rainy Tuesday morning. Sarah \
             ordered a lavender latte, and Michael couldn't stop staring at her beautiful smile.",
            "https://images.unsplash.com/photo-1511285560929-80b456fea0bc?w=600&h=400&fit=crop",
        ),
        moment(
            "2020",
            "First Date",
            "Our first official date was a sunset picnic in Golden Gate Park. We talked for hours \
             about our dreams, travels, and favorite books under the stars.",
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=600&h=400&fit=crop",
        ),
        moment(
            "2021",
            "Moving In Together",
            "After a year of long-distance dating, we decided to take the next step and move in \
             together. Our first apartment was tiny but filled with so much love.",
            "https://images.unsplash.com/photo-1560472354-b33ff0c44a43?w=600&h=400&fit=crop",
        ),
        moment(
            "2023",
            "The Proposal",
            "Michael proposed during our vacation in Santorini, Greece. As the sun set over the \
             Aegean Sea, he got down on one knee with Sarah's grandmother's ring.",
            "https://images.unsplash.com/photo-1597248374161-426f3d6f1f6b?w=600&h=400&fit=crop",
        ),
        moment(
            "2025",
            "Our Wedding Day",
            "And now, we're ready to say 'I do' surrounded by our family and friends. This is \
             just the beginning of our beautiful journey together.",
            "https://images.unsplash.com/photo-1519741497674-611481863552?w=600&h=400&fit=crop",
        ),
    ]
}

fn entry(
    time: &str,
    title: &str,
    description: &str,
    location: &str,
    icon: &str,
    duration: &str,
) -> ScheduleEntry {
    ScheduleEntry {
        time: time.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        icon: icon.to_string(),
        duration: duration.to_string(),
        highlight: false,
    }
}

fn standard_schedule() -> Vec<ScheduleEntry> {
    vec![
        entry(
            "2:00 PM",
            "Guests Arrival & Welcome",
            "Please arrive by 2:00 PM for welcome drinks and mingling before the ceremony begins.",
            "Sunset Garden Estate - Main Entrance",
            "Users",
            "30 minutes",
        ),
        entry(
            "2:30 PM",
            "Pre-Ceremony Music",
            "Enjoy live acoustic music as guests are seated for the ceremony.",
            "Garden Ceremony Space",
            "Music",
            "30 minutes",
        ),
        ScheduleEntry {
            highlight: true,
            ..entry(
                "3:00 PM",
                "Wedding Ceremony",
                "The main event! Wedding ceremony with exchange of vows in our beautiful garden \
                 setting.",
                "Sunset Garden Estate - Ceremony Garden",
                "Calendar",
                "45 minutes",
            )
        },
        entry(
            "3:45 PM",
            "Cocktail Hour & Photos",
            "Celebrate with signature cocktails while the wedding party takes photos.",
            "Terrace & Garden Areas",
            "Camera",
            "1 hour 15 minutes",
        ),
        entry(
            "5:00 PM",
            "Reception Dinner",
            "Join us for a three-course dinner featuring locally sourced ingredients.",
            "Grand Ballroom",
            "Utensils",
            "2 hours",
        ),
        entry(
            "7:30 PM",
            "First Dance & Toasts",
            "Watch the newlyweds' first dance followed by heartfelt toasts from family and \
             friends.",
            "Grand Ballroom",
            "Music",
            "30 minutes",
        ),
        entry(
            "8:00 PM",
            "Dancing & Celebration",
            "Dance the night away with live music and DJ entertainment.",
            "Grand Ballroom & Terrace",
            "Music",
            "4 hours",
        ),
    ]
}
