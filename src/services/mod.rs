// Service module exports

pub mod agenda;
pub mod day_filter;
pub mod fetcher;
pub mod formatter;
pub mod icalendar;
pub mod recurrence;
pub mod settings;
