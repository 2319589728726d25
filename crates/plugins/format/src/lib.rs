//! Output rendering for google-kit tools.
//!
//! Handlers hand API resources to these functions and return the result
//! verbatim to the MCP client:
//!
//! - **Calendar** and **Gmail**: line-oriented text summaries
//! - **Chat**: indented JSON projections with a fixed field set
//!
//! # Example
//!
//! ```ignore
//! use google_kit_format::calendar::events_to_text;
//!
//! let text = events_to_text(&events);
//! ```

pub mod calendar;
pub mod chat;
pub mod gmail;

/// Separator printed after each item in text listings.
pub const SEPARATOR: &str = "-------------------";
