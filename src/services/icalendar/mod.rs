//! RFC 5545 (.ics) import into a calendar model.

pub mod import;
mod service;
mod utils;

pub use service::ICalendarService;
