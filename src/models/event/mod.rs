// Event module
// Calendar event model with iCalendar compatibility

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use std::fmt;

use crate::utils::date::localize;

/// A DTSTART / DTEND / EXDATE / RDATE value in the form the calendar
/// document wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// `VALUE=DATE`, an all-day value.
    Date(NaiveDate),
    /// Wall-clock time without zone information.
    Floating(NaiveDateTime),
    /// `...Z` suffixed value.
    Utc(DateTime<Utc>),
    /// Wall-clock time qualified by a `TZID` parameter.
    Zoned { local: NaiveDateTime, tzid: String },
}

impl EventTime {
    pub fn is_date(&self) -> bool {
        matches!(self, EventTime::Date(_))
    }

    /// The `TZID` this value refers to, if any.
    pub fn tzid(&self) -> Option<&str> {
        match self {
            EventTime::Zoned { tzid, .. } => Some(tzid),
            _ => None,
        }
    }

    /// Look the `TZID` up in the IANA database.
    pub fn timezone(&self) -> Option<Tz> {
        self.tzid().and_then(|tzid| tzid.parse::<Tz>().ok())
    }

    /// Wall-clock time as written, midnight for dates.
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            EventTime::Date(date) => date.and_time(chrono::NaiveTime::MIN),
            EventTime::Floating(local) | EventTime::Zoned { local, .. } => *local,
            EventTime::Utc(dt) => dt.naive_utc(),
        }
    }

    /// The absolute point in time.
    ///
    /// Dates and floating times are read in the local zone. An unknown
    /// `TZID` falls back to the local zone as well.
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            EventTime::Date(_) | EventTime::Floating(_) => localize(&Local, &self.wall_clock()),
            EventTime::Utc(dt) => *dt,
            EventTime::Zoned { local, tzid } => match self.timezone() {
                Some(tz) => localize(&tz, local),
                None => {
                    log::debug!("unknown TZID '{}', reading {} as local time", tzid, local);
                    localize(&Local, local)
                }
            },
        }
    }

    /// Calendar day this value falls on, in its own frame of reference.
    pub fn local_date(&self) -> NaiveDate {
        match self {
            EventTime::Utc(dt) => dt.with_timezone(&Local).date_naive(),
            _ => self.wall_clock().date(),
        }
    }

    /// Same kind of value, moved by `span`. Dates move by whole days.
    ///
    /// `None` if the result leaves the representable range.
    pub fn shifted(&self, span: Duration) -> Option<EventTime> {
        let shifted = match self {
            EventTime::Date(date) => {
                let days = (span.num_hours() + 12).div_euclid(24);
                EventTime::Date(date.checked_add_signed(Duration::try_days(days)?)?)
            }
            EventTime::Floating(local) => EventTime::Floating(local.checked_add_signed(span)?),
            EventTime::Utc(dt) => EventTime::Utc(dt.checked_add_signed(span)?),
            EventTime::Zoned { local, tzid } => EventTime::Zoned {
                local: local.checked_add_signed(span)?,
                tzid: tzid.clone(),
            },
        };
        Some(shifted)
    }
}

/// Renders the ICS basic form: `YYYYMMDD`, `YYYYMMDDTHHMMSS` or
/// `YYYYMMDDTHHMMSSZ`. Zoned values render their wall clock.
impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTime::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            EventTime::Floating(local) | EventTime::Zoned { local, .. } => {
                write!(f, "{}", local.format("%Y%m%dT%H%M%S"))
            }
            EventTime::Utc(dt) => write!(f, "{}", dt.format("%Y%m%dT%H%M%SZ")),
        }
    }
}

/// Calendar event (VEVENT) as far as day agendas are concerned
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub uid: Option<String>,
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    /// SEQUENCE; its presence marks the event as possibly recurring
    pub sequence: Option<i64>,
    /// X-MICROSOFT-CDO-BUSYSTATUS, e.g. `BUSY` or `OOF`
    pub busy_status: Option<String>,
    /// DURATION, when the document states one
    pub duration: Option<Duration>,
    /// TRANSP:TRANSPARENT
    pub transparent: bool,
    pub rrule: Option<String>, // RRULE string (RFC 5545)
    pub exdates: Vec<EventTime>,
    pub rdates: Vec<EventTime>,
}

impl Event {
    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Check if this event may carry recurring instances
    pub fn is_recurring(&self) -> bool {
        self.sequence.is_some()
    }

    /// Length of one instance: DURATION if given, otherwise end - start.
    pub fn span(&self) -> Duration {
        self.duration
            .unwrap_or_else(|| self.end.instant() - self.start.instant())
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    uid: Option<String>,
    summary: String,
    start: Option<EventTime>,
    end: Option<EventTime>,
    sequence: Option<i64>,
    busy_status: Option<String>,
    duration: Option<Duration>,
    transparent: bool,
    rrule: Option<String>,
    exdates: Vec<EventTime>,
    rdates: Vec<EventTime>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self {
            uid: None,
            summary: String::new(),
            start: None,
            end: None,
            sequence: None,
            busy_status: None,
            duration: None,
            transparent: false,
            rrule: None,
            exdates: Vec::new(),
            rdates: Vec::new(),
        }
    }

    pub fn uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn start(mut self, start: EventTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: EventTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn busy_status(mut self, status: impl Into<String>) -> Self {
        self.busy_status = Some(status.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set the recurrence rule (RRULE value without the `RRULE:` prefix)
    pub fn rrule(mut self, rule: impl Into<String>) -> Self {
        self.rrule = Some(rule.into());
        self
    }

    pub fn exdate(mut self, date: EventTime) -> Self {
        self.exdates.push(date);
        self
    }

    pub fn rdate(mut self, date: EventTime) -> Self {
        self.rdates.push(date);
        self
    }

    /// Build the event
    ///
    /// A missing end is derived the way RFC 5545 does it: start plus
    /// DURATION, the next day for all-day events, the start otherwise.
    pub fn build(self) -> Result<Event, String> {
        let start = self.start.ok_or("Event start time is required")?;
        let end = match (self.end, self.duration) {
            (Some(end), _) => Some(end),
            (None, Some(duration)) => start.shifted(duration),
            (None, None) if start.is_date() => start.shifted(Duration::days(1)),
            (None, None) => Some(start.clone()),
        }
        .ok_or("Event duration is out of range")?;

        Ok(Event {
            uid: self.uid,
            summary: self.summary,
            start,
            end,
            sequence: self.sequence,
            busy_status: self.busy_status,
            duration: self.duration,
            transparent: self.transparent,
            rrule: self.rrule,
            exdates: self.exdates,
            rdates: self.rdates,
        })
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
