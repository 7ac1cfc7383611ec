//! Mapping scheduled-task records into calendar-display events.
//!
//! The mapping is deliberately dumb: one record in, one event out, a
//! fixed priority-to-color table, and timestamps built by string
//! concatenation so whatever the service sent is exactly what the
//! calendar widget receives. Every surface that renders a schedule
//! goes through this one function.

use serde::{Deserialize, Serialize};

pub const COLOR_HIGH: &str = "#e74c3c";
pub const COLOR_MEDIUM: &str = "#f1c40f";
pub const COLOR_LOW: &str = "#27ae60";

/// One placed task as returned by `POST /schedule`.
///
/// Dates and times stay as the raw wire strings; nothing here parses
/// them. A record that fails to render downstream is the only signal
/// for malformed input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTaskRecord {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub priority: Option<String>,
}

/// A display-ready calendar event for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
    pub end: String,
    pub color: String,
}

/// Color depends on priority and nothing else. Anything that is not
/// exactly "high" or "low" gets the medium color.
pub fn priority_color(priority: Option<&str>) -> &'static str {
    match priority {
        Some("high") => COLOR_HIGH,
        Some("low") => COLOR_LOW,
        _ => COLOR_MEDIUM,
    }
}

/// Map records one-to-one into events, preserving order. An absent
/// record list maps to no events.
pub fn map_events(scheduled: Option<Vec<ScheduledTaskRecord>>) -> Vec<CalendarEvent> {
    scheduled
        .unwrap_or_default()
        .into_iter()
        .map(|record| CalendarEvent {
            start: format!("{}T{}", record.date, record.start_time),
            end: format!("{}T{}", record.date, record.end_time),
            color: priority_color(record.priority.as_deref()).to_string(),
            title: record.title,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, priority: Option<&str>) -> ScheduledTaskRecord {
        ScheduledTaskRecord {
            title: title.to_string(),
            date: "2024-06-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            priority: priority.map(|value| value.to_string()),
        }
    }

    #[test]
    fn maps_the_gym_record_exactly() {
        let events = map_events(Some(vec![record("Gym", Some("low"))]));
        assert_eq!(
            events,
            vec![CalendarEvent {
                title: "Gym".to_string(),
                start: "2024-06-01T09:00".to_string(),
                end: "2024-06-01T10:00".to_string(),
                color: "#27ae60".to_string(),
            }]
        );
    }

    #[test]
    fn color_is_a_function_of_priority_alone() {
        assert_eq!(priority_color(Some("high")), COLOR_HIGH);
        assert_eq!(priority_color(Some("low")), COLOR_LOW);
        assert_eq!(priority_color(Some("medium")), COLOR_MEDIUM);
        assert_eq!(priority_color(Some("critical")), COLOR_MEDIUM);
        assert_eq!(priority_color(None), COLOR_MEDIUM);
    }

    #[test]
    fn absent_or_empty_lists_map_to_no_events() {
        assert!(map_events(None).is_empty());
        assert!(map_events(Some(Vec::new())).is_empty());
    }

    #[test]
    fn mapping_is_one_to_one_and_order_preserving() {
        let events = map_events(Some(vec![
            record("A", Some("high")),
            record("B", None),
            record("A", Some("high")),
        ]));
        let titles: Vec<&str> = events.iter().map(|event| event.title.as_str()).collect();
        // No filtering, sorting, or deduplication.
        assert_eq!(titles, vec!["A", "B", "A"]);
        assert_eq!(events[0].color, COLOR_HIGH);
        assert_eq!(events[1].color, COLOR_MEDIUM);
    }

    #[test]
    fn malformed_strings_pass_through_untouched() {
        let events = map_events(Some(vec![ScheduledTaskRecord {
            title: "Odd".to_string(),
            date: "junk".to_string(),
            start_time: "9".to_string(),
            end_time: "25:99".to_string(),
            priority: None,
        }]));
        assert_eq!(events[0].start, "junkT9");
        assert_eq!(events[0].end, "junkT25:99");
    }
}
