// Test fixtures - reusable calendar documents
// Shared by the integration and property tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use day_agenda::models::calendar::{CalendarComponent, CalendarModel};
use day_agenda::models::event::{Event, EventTime};

/// Sample ICS documents
pub mod ics {
    /// One plain meeting on 2021-04-21
    pub const STANDUP: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Day Agenda//Tests//EN\r\n\
BEGIN:VEVENT\r\n\
UID:standup-1\r\n\
DTSTART:20210421T090000\r\n\
DTEND:20210421T093000\r\n\
SUMMARY:Standup\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    /// A daily series starting 2021-04-01, plus a one-off on 2021-04-21
    pub const DAILY_SERIES: &str = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Vienna\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:series-1\r\n\
DTSTART:20210401T140000\r\n\
DTEND:20210401T144500\r\n\
SEQUENCE:0\r\n\
RRULE:FREQ=DAILY;COUNT=60\r\n\
SUMMARY:Review\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
UID:one-off-1\r\n\
DTSTART:20210421T100000\r\n\
DTEND:20210421T113000\r\n\
X-MICROSOFT-CDO-BUSYSTATUS:BUSY\r\n\
SUMMARY:Planning\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    /// Two same-titled entries without DURATION
    pub const DUPLICATES: &str = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DTSTART:20210421T090000\r\n\
DTEND:20210421T093000\r\n\
SUMMARY:Sync\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
DTSTART:20210421T150000\r\n\
DTEND:20210421T160000\r\n\
SUMMARY:Sync\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    /// A recurring event whose rule cannot be read, followed by a valid one
    pub const BROKEN_RULE: &str = "BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DTSTART:20210401T080000\r\n\
DTEND:20210401T083000\r\n\
SEQUENCE:1\r\n\
RRULE:FREQ=SOMETIMES\r\n\
SUMMARY:Broken\r\n\
END:VEVENT\r\n\
BEGIN:VEVENT\r\n\
DTSTART:20210421T120000\r\n\
DTEND:20210421T130000\r\n\
SUMMARY:Lunch\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    /// Only a time zone definition
    pub const TIMEZONE_ONLY: &str = "BEGIN:VCALENDAR\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Vienna\r\n\
END:VTIMEZONE\r\n\
END:VCALENDAR\r\n";
}

/// Returns 2021-04-`day` at `hour`:`minute`
pub fn april_2021(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 4, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Creates a floating event
pub fn meeting(summary: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event::builder()
        .summary(summary)
        .start(EventTime::Floating(start))
        .end(EventTime::Floating(end))
        .build()
        .unwrap()
}

/// Wraps events in a calendar model, in order
pub fn calendar_of(events: Vec<Event>) -> CalendarModel {
    events.into_iter().map(CalendarComponent::Event).collect()
}
