// Date utility functions
// Day parsing and wall-clock to instant conversion

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// Input format of a requested day, e.g. `2021-04-21`.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Length of the window a day covers.
pub const DAY_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Error)]
pub enum InvalidDate {
    #[error("'{input}' is not a day in YYYY-MM-DD format")]
    Format {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("{0} has no local midnight")]
    NoMidnight(NaiveDate),
    #[error("{0} is outside the supported range")]
    OutOfRange(NaiveDate),
}

/// The day an agenda is requested for.
///
/// Holds the calendar date, its plain `YYYYMMDD` form (the prefix event
/// starts are matched against) and the local midnight that opens the
/// day window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDate {
    date: NaiveDate,
    plain: String,
    midnight: DateTime<Local>,
    window_end: DateTime<Utc>,
}

impl TargetDate {
    /// Parse a `YYYY-MM-DD` string. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, InvalidDate> {
        let date = NaiveDate::parse_from_str(input.trim(), DAY_FORMAT).map_err(|source| {
            InvalidDate::Format {
                input: input.to_string(),
                source,
            }
        })?;
        Self::from_date(date)
    }

    pub fn from_date(date: NaiveDate) -> Result<Self, InvalidDate> {
        let midnight = start_of_day(date).ok_or(InvalidDate::NoMidnight(date))?;
        let window_end = midnight
            .with_timezone(&Utc)
            .checked_add_signed(Duration::hours(DAY_WINDOW_HOURS))
            .ok_or(InvalidDate::OutOfRange(date))?;

        Ok(Self {
            date,
            plain: date.format("%Y%m%d").to_string(),
            midnight,
            window_end,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `YYYYMMDD`, no separators.
    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn midnight(&self) -> DateTime<Local> {
        self.midnight
    }

    /// Half-open `[midnight, midnight + 24h)` window in UTC.
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.midnight.with_timezone(&Utc), self.window_end)
    }
}

/// Local midnight of `date`, or `None` if the zone skips it.
pub fn start_of_day(date: NaiveDate) -> Option<DateTime<Local>> {
    Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
}

/// Resolve a wall-clock time in `tz` to an instant.
///
/// Ambiguous times take the earlier offset. Times inside a DST gap are
/// moved forward by an hour, and if that fails too the wall clock is read
/// as UTC.
pub fn localize<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| {
            naive
                .checked_add_signed(Duration::hours(1))
                .and_then(|later| tz.from_local_datetime(&later).earliest())
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(naive))
}
