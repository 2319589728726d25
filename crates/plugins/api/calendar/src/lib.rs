//! Google Calendar client for google-kit.
//!
//! Operates on the authenticated user's primary calendar.

mod client;
mod types;

pub use client::CalendarClient;

/// Default Calendar API URL.
pub const DEFAULT_CALENDAR_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Calendar all operations target.
pub const PRIMARY_CALENDAR: &str = "primary";
