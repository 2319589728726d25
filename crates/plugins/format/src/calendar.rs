//! Calendar event summaries.

use chrono::DateTime;
use google_kit_core::{Event, EventDateTime};

use crate::SEPARATOR;

/// Display format for event start and end times.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render an event boundary in its own offset.
///
/// All-day events show their date; values that are not RFC3339 are shown as
/// received.
pub fn format_event_time(value: Option<&EventDateTime>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    if let Some(date_time) = &value.date_time {
        return match DateTime::parse_from_rfc3339(date_time) {
            Ok(parsed) => parsed.format(TIME_FORMAT).to_string(),
            Err(_) => date_time.clone(),
        };
    }

    value.date.clone().unwrap_or_default()
}

/// Render the `calendar_list_events` summary.
pub fn events_to_text(events: &[Event]) -> String {
    let mut output = format!("Found {} upcoming events:\n\n", events.len());

    for event in events {
        output.push_str(&format!(
            "Event: {}\n",
            event.summary.as_deref().unwrap_or_default()
        ));
        output.push_str(&format!(
            "Start: {}\n",
            format_event_time(event.start.as_ref())
        ));
        output.push_str(&format!("End: {}\n", format_event_time(event.end.as_ref())));
        if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
            output.push_str(&format!("Description: {}\n", description));
        }
        output.push_str(SEPARATOR);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(summary: &str, start: &str, end: &str) -> Event {
        Event {
            summary: Some(summary.to_string()),
            start: Some(EventDateTime::at(start)),
            end: Some(EventDateTime::at(end)),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_keeps_offset() {
        let value = EventDateTime::at("2024-05-01T09:30:00+07:00");
        assert_eq!(format_event_time(Some(&value)), "2024-05-01 09:30");
    }

    #[test]
    fn test_format_all_day() {
        let value = EventDateTime {
            date: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        assert_eq!(format_event_time(Some(&value)), "2024-05-01");
        assert_eq!(format_event_time(None), "");
    }

    #[test]
    fn test_events_to_text() {
        let mut review = event("Review", "2024-05-02T14:00:00Z", "2024-05-02T15:00:00Z");
        review.description = Some("Quarterly numbers".to_string());
        let events = vec![
            event("Standup", "2024-05-01T09:00:00Z", "2024-05-01T09:15:00Z"),
            review,
        ];

        assert_eq!(
            events_to_text(&events),
            "Found 2 upcoming events:\n\n\
             Event: Standup\n\
             Start: 2024-05-01 09:00\n\
             End: 2024-05-01 09:15\n\
             -------------------\n\
             Event: Review\n\
             Start: 2024-05-02 14:00\n\
             End: 2024-05-02 15:00\n\
             Description: Quarterly numbers\n\
             -------------------\n"
        );
    }

    #[test]
    fn test_no_events() {
        assert_eq!(events_to_text(&[]), "Found 0 upcoming events:\n\n");
    }
}
