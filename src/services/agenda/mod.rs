//! Fetch, parse and resolve a calendar for one day.

use thiserror::Error;

use crate::models::calendar::CalendarModel;
use crate::services::day_filter::{DayFilter, Resolution};
use crate::services::fetcher::IcsProvider;
use crate::services::formatter;
use crate::services::icalendar::ICalendarService;

#[derive(Debug, Error)]
pub enum AgendaError {
    /// The calendar could not be downloaded or parsed
    #[error("error reading calendar: {0:#}")]
    CalendarFetch(anyhow::Error),
}

/// Reads a remote calendar and lists the entries of a day.
pub struct AgendaService<P: IcsProvider> {
    provider: P,
    importer: ICalendarService,
    filter: DayFilter,
    hide_out_of_office: bool,
}

impl<P: IcsProvider> AgendaService<P> {
    pub fn new(provider: P, filter: DayFilter) -> Self {
        Self {
            provider,
            importer: ICalendarService::new(),
            filter,
            hide_out_of_office: false,
        }
    }

    /// Leave out entries whose busy status is `OOF`.
    pub fn hide_out_of_office(mut self, hide: bool) -> Self {
        self.hide_out_of_office = hide;
        self
    }

    pub fn load_calendar(&self, url: &str) -> Result<CalendarModel, AgendaError> {
        let content = self
            .provider
            .fetch_ics(url)
            .map_err(AgendaError::CalendarFetch)?;
        self.importer
            .import_calendar(&content)
            .map_err(AgendaError::CalendarFetch)
    }

    /// Entries of `day` in the calendar behind `url`.
    ///
    /// A calendar that cannot be read is an error; the day is not resolved
    /// at all in that case.
    pub fn entries_for_day(&self, url: &str, day: &str) -> Result<Resolution, AgendaError> {
        let calendar = self.load_calendar(url).map_err(|err| {
            log::error!("{}", err);
            err
        })?;
        Ok(self.resolve(&calendar, day))
    }

    /// Resolve an already loaded calendar.
    pub fn resolve(&self, calendar: &CalendarModel, day: &str) -> Resolution {
        let mut resolution = self.filter.resolve(calendar, day);

        if self.hide_out_of_office {
            let before = resolution.entries.len();
            resolution
                .entries
                .retain(|entry| !formatter::is_out_of_office(entry));
            log::debug!(
                "{} out-of-office entries hidden",
                before - resolution.entries.len()
            );
        }

        resolution
    }
}
