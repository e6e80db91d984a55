use super::{
    baseline::BaselineTemplate,
    record::{PartialWeddingRecord, WeddingRecord},
};

/// Completes a found record with values from the baseline.
///
/// Each field comes from `found` when it is present there, and from the
/// baseline otherwise. Fields `found` carries that the baseline does not know
/// about are kept as they are. With nothing found, the result is the baseline.
#[must_use]
pub fn merge(found: Option<PartialWeddingRecord>, baseline: &BaselineTemplate) -> WeddingRecord {
    let Some(found) = found else {
        return baseline.record().clone();
    };

    // Destructure so that a new field cannot be forgotten here.
    let PartialWeddingRecord {
        owner_id,
        custom_url,
        couple_name_1,
        couple_name_2,
        wedding_date,
        venue_name,
        venue_location,
        their_story,
        theme,
        story_timeline,
        schedule_events,
        extra,
    } = found;

    let mut merged_extra = baseline.extra.clone();
    merged_extra.extend(extra);

    WeddingRecord {
        owner_id: owner_id.unwrap_or_else(|| baseline.owner_id.clone()),
        custom_url: custom_url.or_else(|| baseline.custom_url.clone()),
        couple_name_1: couple_name_1.unwrap_or_else(|| baseline.couple_name_1.clone()),
        couple_name_2: couple_name_2.unwrap_or_else(|| baseline.couple_name_2.clone()),
        wedding_date: wedding_date.unwrap_or_else(|| baseline.wedding_date.clone()),
        venue_name: venue_name.unwrap_or_else(|| baseline.venue_name.clone()),
        venue_location: venue_location.unwrap_or_else(|| baseline.venue_location.clone()),
        their_story: their_story.unwrap_or_else(|| baseline.their_story.clone()),
        theme: theme.unwrap_or_else(|| baseline.theme.clone()),
        story_timeline: story_timeline.unwrap_or_else(|| baseline.story_timeline.clone()),
        schedule_events: schedule_events.unwrap_or_else(|| baseline.schedule_events.clone()),
        extra: merged_extra,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_record_json() -> serde_json::Value {
        json!({
            "user_id": "u9",
            "custom_url": "asha-and-ravi",
            "couple_name_1": "Asha",
            "couple_name_2": "Ravi",
            "wedding_date": "2026-12-05",
            "venue_name": "Lakeside Pavilion",
            "venue_location": "Lakeside Pavilion • Udaipur",
            "their_story": "Met at a book fair.",
            "theme": "modern",
            "story_timeline": [
                {"year": "2018", "title": "Book fair", "description": "Same shelf.", "image": "a.jpg"}
            ],
            "schedule_events": [
                {"time": "6:00 PM", "title": "Sangeet", "description": "Music night.",
                 "location": "Lawn", "icon": "Music", "duration": "3 hours", "highlight": true}
            ],
            "gallery_photos": ["one.jpg", "two.jpg"],
        })
    }

    #[test]
    fn nothing_found_yields_baseline() {
        let baseline = BaselineTemplate::standard();
        assert_eq!(merge(None, &baseline), *baseline.record());
    }

    #[test]
    fn empty_partial_yields_baseline() {
        let baseline = BaselineTemplate::standard();
        let merged = merge(Some(PartialWeddingRecord::default()), &baseline);
        assert_eq!(merged, *baseline.record());
    }

    #[test]
    fn full_record_passes_through_unchanged() {
        let baseline = BaselineTemplate::standard();
        let found: PartialWeddingRecord = serde_json::from_value(full_record_json()).unwrap();
        let expected: WeddingRecord = serde_json::from_value(full_record_json()).unwrap();

        assert_eq!(merge(Some(found), &baseline), expected);
    }

    #[test]
    fn partial_record_is_completed_field_by_field() {
        let baseline = BaselineTemplate::standard();
        let found: PartialWeddingRecord = serde_json::from_value(json!({
            "user_id": "u1",
            "couple_name_1": "Asha",
            "couple_name_2": null,
            "their_story": "",
            "schedule_events": [],
        }))
        .unwrap();

        let merged = merge(Some(found), &baseline);

        assert_eq!(merged.owner_id, "u1");
        assert_eq!(merged.couple_name_1, "Asha");
        assert_eq!(merged.couple_name_2, baseline.couple_name_2);
        assert_eq!(merged.their_story, "");
        assert!(merged.schedule_events.is_empty());
        assert_eq!(merged.story_timeline, baseline.story_timeline);
        assert_eq!(merged.venue_name, baseline.venue_name);
        assert_eq!(merged.wedding_date, baseline.wedding_date);
    }

    #[test]
    fn merging_is_idempotent() {
        let baseline = BaselineTemplate::standard();
        let found: PartialWeddingRecord =
            serde_json::from_value(json!({"couple_name_1": "Asha", "faqs": []})).unwrap();

        let once = merge(Some(found.clone()), &baseline);
        let twice = merge(Some(found), &baseline);
        assert_eq!(once, twice);

        let remerged = merge(Some(once.clone().into()), &baseline);
        assert_eq!(remerged, once);
    }
}
