//! Resolves the entries of a calendar document for one day.

use thiserror::Error;

use crate::models::calendar::{CalendarComponent, CalendarModel};
use crate::models::event::Event;
use crate::models::occurrence::ResolvedOccurrence;
use crate::services::formatter;
use crate::services::recurrence::{ExpansionError, OccurrenceExpander};
use crate::utils::date::{InvalidDate, TargetDate};

pub mod dedup;
pub mod matcher;

/// Problems met while resolving a day. None of them abort resolution.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("cannot parse requested day")]
    DateParse(#[from] InvalidDate),
    #[error("cannot expand '{summary}'")]
    Expansion {
        summary: String,
        #[source]
        source: ExpansionError,
    },
}

/// Outcome of [`DayFilter::resolve`]
#[derive(Debug, Default)]
pub struct Resolution {
    /// `None` if the requested day could not be parsed
    pub target: Option<TargetDate>,
    /// Kept entries in component order
    pub entries: Vec<ResolvedOccurrence>,
    /// Everything that went wrong on the way
    pub issues: Vec<FilterError>,
}

impl Resolution {
    fn rejected(error: FilterError) -> Self {
        Self {
            issues: vec![error],
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One formatted line per entry.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(formatter::format).collect()
    }

    /// Formatted lines joined by newlines.
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

/// Picks the events, and instances of recurring events, that take place
/// on a requested day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayFilter {
    expander: OccurrenceExpander,
}

impl DayFilter {
    pub fn new(expander: OccurrenceExpander) -> Self {
        Self { expander }
    }

    /// Resolve `calendar` for `day` (`YYYY-MM-DD`).
    ///
    /// Never fails: an unparsable day gives an empty resolution, an event
    /// whose recurrence cannot be evaluated is left out. Both are logged
    /// and recorded in [`Resolution::issues`].
    pub fn resolve(&self, calendar: &CalendarModel, day: &str) -> Resolution {
        log::info!("search for date: '{}'", day);

        let target = match TargetDate::parse(day) {
            Ok(target) => target,
            Err(err) => {
                log::error!("error parsing date: {}", err);
                return Resolution::rejected(err.into());
            }
        };

        let mut resolution = calendar
            .components()
            .iter()
            .fold(Resolution::default(), |acc, component| {
                self.visit(acc, component, &target)
            });
        resolution.target = Some(target);

        log::debug!(
            "{} of {} components kept for {}",
            resolution.entries.len(),
            calendar.len(),
            day
        );
        resolution
    }

    fn visit(
        &self,
        mut acc: Resolution,
        component: &CalendarComponent,
        target: &TargetDate,
    ) -> Resolution {
        match component {
            CalendarComponent::Event(event) => self.add_by_date(&mut acc, event, target),
            CalendarComponent::TimeZone(timezone) => {
                log::debug!(
                    "this is a time zone: {}",
                    timezone.tzid.as_deref().unwrap_or("<no TZID>")
                );
            }
            CalendarComponent::Unknown(name) => {
                log::warn!("skipping unsupported component {}", name);
            }
        }
        acc
    }

    fn add_by_date(&self, acc: &mut Resolution, event: &Event, target: &TargetDate) {
        if matcher::matches(event, target.plain()) && !dedup::is_duplicate(event, &acc.entries) {
            acc.entries.push(ResolvedOccurrence::single(event));
            log::debug!("single event added: {}", event.summary);
        } else if matcher::is_recurring(event) {
            self.add_occurrences(acc, event, target);
        }
    }

    fn add_occurrences(&self, acc: &mut Resolution, event: &Event, target: &TargetDate) {
        let occurrences = match self.expander.expand(event, target) {
            Ok(occurrences) => occurrences,
            Err(source) => {
                log::error!("error getting occurrence of '{}': {}", event.summary, source);
                acc.issues.push(FilterError::Expansion {
                    summary: event.summary.clone(),
                    source,
                });
                return;
            }
        };

        for occurrence in occurrences {
            if !dedup::is_duplicate(&occurrence.event, &acc.entries) {
                log::debug!("recurring event added: {}", event.summary);
                acc.entries.push(occurrence);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::calendar::TimeZoneInfo;
    use crate::models::event::EventTime;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 4, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn meeting(summary: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::builder()
            .summary(summary)
            .start(EventTime::Floating(start))
            .end(EventTime::Floating(end))
            .build()
            .unwrap()
    }

    fn calendar(events: Vec<Event>) -> CalendarModel {
        events.into_iter().map(CalendarComponent::Event).collect()
    }

    #[test]
    fn test_single_event_on_day() {
        let model = calendar(vec![meeting("Standup", at(21, 9, 0), at(21, 9, 30))]);
        let resolution = DayFilter::default().resolve(&model, "2021-04-21");

        assert_eq!(resolution.lines(), vec!["0h 30m () Standup"]);
        assert!(resolution.entries[0].recurrence_id.is_none());
        assert!(resolution.issues.is_empty());
    }

    #[test]
    fn test_single_event_other_day() {
        let model = calendar(vec![meeting("Standup", at(21, 9, 0), at(21, 9, 30))]);
        let resolution = DayFilter::default().resolve(&model, "2021-04-22");

        assert!(resolution.is_empty());
        assert_eq!(resolution.to_text(), "");
    }

    #[test]
    fn test_invalid_day() {
        let model = calendar(vec![meeting("Standup", at(21, 9, 0), at(21, 9, 30))]);
        let resolution = DayFilter::default().resolve(&model, "not-a-date");

        assert!(resolution.is_empty());
        assert!(resolution.target.is_none());
        assert!(matches!(resolution.issues[..], [FilterError::DateParse(_)]));
    }

    #[test]
    fn test_timezone_and_unknown_components_are_skipped() {
        let model = CalendarModel::new(vec![
            CalendarComponent::TimeZone(TimeZoneInfo {
                tzid: Some("Europe/Vienna".to_string()),
            }),
            CalendarComponent::Unknown("VTODO".to_string()),
        ]);
        let resolution = DayFilter::default().resolve(&model, "2021-04-21");

        assert!(resolution.is_empty());
        assert!(resolution.issues.is_empty());
        assert!(resolution.target.is_some());
    }

    #[test]
    fn test_duplicates_keep_first() {
        let model = calendar(vec![
            meeting("Standup", at(21, 9, 0), at(21, 9, 30)),
            meeting("Standup", at(21, 14, 0), at(21, 15, 0)),
        ]);
        let resolution = DayFilter::default().resolve(&model, "2021-04-21");

        assert_eq!(resolution.lines(), vec!["0h 30m () Standup"]);
    }

    #[test]
    fn test_recurring_instance_is_expanded() {
        let mut event = meeting("Standup", at(1, 9, 0), at(1, 9, 15));
        event.sequence = Some(0);
        event.rrule = Some("FREQ=DAILY".to_string());

        let resolution = DayFilter::default().resolve(&calendar(vec![event]), "2021-04-21");

        assert_eq!(resolution.entries.len(), 1);
        let entry = &resolution.entries[0];
        assert_eq!(
            entry.recurrence_id,
            Some(resolution.target.as_ref().unwrap().midnight())
        );
        assert_eq!(resolution.lines(), vec!["0h 15m () Standup"]);
    }

    #[test]
    fn test_rule_without_sequence_is_not_expanded() {
        let mut event = meeting("Standup", at(1, 9, 0), at(1, 9, 15));
        event.rrule = Some("FREQ=DAILY".to_string());

        let resolution = DayFilter::default().resolve(&calendar(vec![event]), "2021-04-21");
        assert!(resolution.is_empty());
    }

    #[test]
    fn test_expansion_failure_does_not_stop_iteration() {
        let mut broken = meeting("Broken", at(1, 9, 0), at(1, 9, 15));
        broken.sequence = Some(0);
        broken.rrule = Some("FREQ=NEVER".to_string());
        let fine = meeting("Lunch", at(21, 12, 0), at(21, 13, 0));

        let resolution = DayFilter::default().resolve(&calendar(vec![broken, fine]), "2021-04-21");

        assert_eq!(resolution.lines(), vec!["1h 0m () Lunch"]);
        assert!(matches!(
            resolution.issues[..],
            [FilterError::Expansion { .. }]
        ));
    }

    #[test]
    fn test_matched_duplicate_with_sequence_falls_through_to_expansion() {
        let first = meeting("Sync", at(21, 9, 0), at(21, 9, 30));
        let mut second = meeting("Sync", at(21, 15, 0), at(21, 15, 30));
        second.sequence = Some(2);

        let resolution = DayFilter::default().resolve(&calendar(vec![first, second]), "2021-04-21");

        // the second one expands to its own period, which dedup drops again
        assert_eq!(resolution.entries.len(), 1);
        assert!(resolution.entries[0].recurrence_id.is_none());
    }

    #[test]
    fn test_overlapping_instances_collapse_to_one_entry() {
        let mut check_in = meeting("Check-in", at(20, 0, 0), at(20, 0, 30));
        check_in.sequence = Some(0);
        check_in.rrule = Some("FREQ=HOURLY;INTERVAL=6".to_string());

        let resolution = DayFilter::default().resolve(&calendar(vec![check_in]), "2021-04-21");

        assert_eq!(resolution.lines(), vec!["0h 30m () Check-in"]);
        assert_eq!(
            resolution.entries[0].recurrence_id,
            Some(TargetDate::parse("2021-04-21").unwrap().midnight())
        );
        assert_eq!(resolution.entries[0].start, EventTime::Floating(at(21, 0, 0)));
    }

    #[test]
    fn test_oversized_duration_is_recorded_not_raised() {
        let mut forever = meeting("Forever", at(1, 9, 0), at(1, 9, 30));
        forever.sequence = Some(0);
        forever.rrule = Some("FREQ=DAILY".to_string());
        forever.duration = Some(chrono::Duration::weeks(99_999_999));
        let lunch = meeting("Lunch", at(21, 12, 0), at(21, 13, 0));

        let resolution = DayFilter::default().resolve(&calendar(vec![forever, lunch]), "2021-04-21");

        assert_eq!(resolution.lines(), vec!["1h 0m () Lunch"]);
        assert!(matches!(
            &resolution.issues[..],
            [FilterError::Expansion {
                source: ExpansionError::OutOfRange(_),
                ..
            }]
        ));
    }
}
