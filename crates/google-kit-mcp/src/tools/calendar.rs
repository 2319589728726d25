//! Google Calendar tools.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use google_kit_core::{
    Attendee, CalendarProvider, Error, Event, EventDateTime, EventQuery, Result,
};
use google_kit_format::calendar::events_to_text;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{failed, ToolSpec};
use crate::params::{self, comma_list, count, non_empty, present};
use crate::protocol::ToolDefinition;

const DEFAULT_MAX_RESULTS: u32 = 10;
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Accepted values for `calendar_respond_to_event`.
const RESPONSES: [&str; 3] = ["accepted", "declined", "tentative"];

pub(crate) fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolSpec::new("calendar_create_event", "Create a new event in Google Calendar")
            .required_string("summary", "Title of the event")
            .string("description", "Description of the event")
            .required_string(
                "start_time",
                "Start time of the event in RFC3339 format (e.g., 2023-12-25T09:00:00Z)",
            )
            .required_string("end_time", "End time of the event in RFC3339 format")
            .string("attendees", "Comma-separated list of attendee email addresses")
            .build(),
        ToolSpec::new("calendar_list_events", "List upcoming events in Google Calendar")
            .string(
                "time_min",
                "Start time for the search in RFC3339 format (default: now)",
            )
            .string(
                "time_max",
                "End time for the search in RFC3339 format (default: 1 week from now)",
            )
            .number(
                "max_results",
                "Maximum number of events to return (default: 10)",
            )
            .build(),
        ToolSpec::new("calendar_update_event", "Update an existing event in Google Calendar")
            .required_string("event_id", "ID of the event to update")
            .string("summary", "New title of the event")
            .string("description", "New description of the event")
            .string("start_time", "New start time of the event in RFC3339 format")
            .string("end_time", "New end time of the event in RFC3339 format")
            .string(
                "attendees",
                "Comma-separated list of new attendee email addresses",
            )
            .build(),
        ToolSpec::new(
            "calendar_respond_to_event",
            "Respond to an event invitation in Google Calendar",
        )
        .required_string("event_id", "ID of the event to respond to")
        .required_string(
            "response",
            "Your response (accepted, declined, or tentative)",
        )
        .build(),
    ]
}

pub(crate) async fn call(
    calendar: &dyn CalendarProvider,
    name: &str,
    arguments: Option<Value>,
) -> Result<String> {
    match name {
        "calendar_create_event" => create_event(calendar, params::parse(arguments)?).await,
        "calendar_list_events" => list_events(calendar, params::parse(arguments)?).await,
        "calendar_update_event" => update_event(calendar, params::parse(arguments)?).await,
        "calendar_respond_to_event" => {
            respond_to_event(calendar, params::parse(arguments)?).await
        }
        other => Err(Error::invalid_argument(format!("Unknown tool: {}", other))),
    }
}

#[derive(Debug, Deserialize)]
struct CreateEventParams {
    summary: String,
    #[serde(default)]
    description: Option<String>,
    start_time: String,
    end_time: String,
    #[serde(default)]
    attendees: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListEventsParams {
    #[serde(default)]
    time_min: Option<String>,
    #[serde(default)]
    time_max: Option<String>,
    #[serde(default, deserialize_with = "count")]
    max_results: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct UpdateEventParams {
    event_id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    attendees: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RespondParams {
    event_id: String,
    response: String,
}

/// Parse an RFC3339 argument and normalize it, naming the field on failure.
fn rfc3339(value: &str, field: &str) -> Result<String> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .map_err(|_| Error::invalid_argument(format!("Invalid {} format", field)))
}

fn utc_rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Resolve the listing window, defaulting to `now .. now + 7 days`.
fn resolve_window(
    time_min: Option<&str>,
    time_max: Option<&str>,
    now: DateTime<Utc>,
) -> (String, String) {
    let min = time_min
        .map(str::to_string)
        .unwrap_or_else(|| utc_rfc3339(now));
    let max = time_max
        .map(str::to_string)
        .unwrap_or_else(|| utc_rfc3339(now + Duration::days(DEFAULT_WINDOW_DAYS)));
    (min, max)
}

fn attendee_list(raw: &str) -> Vec<Attendee> {
    comma_list(raw).into_iter().map(Attendee::with_email).collect()
}

fn set_time(slot: &mut Option<EventDateTime>, date_time: String) {
    let value = slot.get_or_insert_with(EventDateTime::default);
    value.date_time = Some(date_time);
    value.date = None;
}

async fn create_event(calendar: &dyn CalendarProvider, params: CreateEventParams) -> Result<String> {
    let start = rfc3339(&params.start_time, "start_time")?;
    let end = rfc3339(&params.end_time, "end_time")?;

    let event = Event {
        summary: Some(params.summary),
        description: present(&params.description).map(str::to_string),
        start: Some(EventDateTime::at(start)),
        end: Some(EventDateTime::at(end)),
        attendees: present(&params.attendees)
            .map(attendee_list)
            .unwrap_or_default(),
        ..Default::default()
    };

    let created = calendar
        .insert_event(&event)
        .await
        .map_err(failed("create event"))?;

    Ok(format!(
        "Successfully created event with ID: {}",
        created.id.unwrap_or_default()
    ))
}

async fn list_events(calendar: &dyn CalendarProvider, params: ListEventsParams) -> Result<String> {
    let (time_min, time_max) = resolve_window(
        present(&params.time_min),
        present(&params.time_max),
        Utc::now(),
    );
    let query = EventQuery {
        time_min,
        time_max,
        max_results: params.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
    };
    debug!(?query, "Listing calendar events");

    let events = calendar
        .list_events(&query)
        .await
        .map_err(failed("list events"))?;

    Ok(events_to_text(&events))
}

async fn update_event(calendar: &dyn CalendarProvider, params: UpdateEventParams) -> Result<String> {
    let event_id = non_empty(&params.event_id, "event_id")?;

    // Validate before touching the remote event.
    let start = present(&params.start_time)
        .map(|v| rfc3339(v, "start_time"))
        .transpose()?;
    let end = present(&params.end_time)
        .map(|v| rfc3339(v, "end_time"))
        .transpose()?;

    let mut event = calendar
        .get_event(event_id)
        .await
        .map_err(failed("get event"))?;

    if let Some(summary) = present(&params.summary) {
        event.summary = Some(summary.to_string());
    }
    if let Some(description) = present(&params.description) {
        event.description = Some(description.to_string());
    }
    if let Some(start) = start {
        set_time(&mut event.start, start);
    }
    if let Some(end) = end {
        set_time(&mut event.end, end);
    }
    if let Some(attendees) = present(&params.attendees) {
        event.attendees = attendee_list(attendees);
    }

    let updated = calendar
        .update_event(event_id, &event)
        .await
        .map_err(failed("update event"))?;

    Ok(format!(
        "Successfully updated event with ID: {}",
        updated.id.as_deref().unwrap_or(event_id)
    ))
}

async fn respond_to_event(calendar: &dyn CalendarProvider, params: RespondParams) -> Result<String> {
    let event_id = non_empty(&params.event_id, "event_id")?;
    let response = params.response.trim();
    if !RESPONSES.contains(&response) {
        return Err(Error::invalid_argument(format!(
            "response must be one of: {}",
            RESPONSES.join(", ")
        )));
    }

    let mut event = calendar
        .get_event(event_id)
        .await
        .map_err(failed("get event"))?;

    let me = event
        .attendees
        .iter_mut()
        .find(|a| a.is_self)
        .ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "you are not an attendee of event {}",
                event_id
            ))
        })?;
    me.response_status = Some(response.to_string());

    calendar
        .update_event(event_id, &event)
        .await
        .map_err(failed("update event response"))?;

    Ok(format!(
        "Successfully responded '{}' to event with ID: {}",
        response, event_id
    ))
}
