//! Expansion of recurring events onto a single day.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::models::event::{Event, EventTime};
use crate::models::occurrence::ResolvedOccurrence;
use crate::utils::date::TargetDate;

mod rule;

/// Default upper bound of rule instances generated per event
pub const DEFAULT_EXPANSION_LIMIT: u16 = 100;

#[derive(Debug, Error)]
pub enum ExpansionError {
    #[error("cannot evaluate RRULE '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },
    #[error("unknown timezone '{0}'")]
    UnknownTimezone(String),
    #[error("duration {0} leaves the supported date range")]
    OutOfRange(Duration),
}

/// Computes the instances a recurring event has on a given day.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceExpander {
    limit: u16,
}

impl OccurrenceExpander {
    pub fn new(limit: u16) -> Self {
        Self { limit: limit.max(1) }
    }

    /// Instances of `event` whose period overlaps the day window of
    /// `target` and whose start renders on that day, in start order.
    ///
    /// Each instance is a copy of the event with its recurrence id set to
    /// the day's midnight. Transparent events consume no time and yield
    /// nothing.
    pub fn expand(
        &self,
        event: &Event,
        target: &TargetDate,
    ) -> Result<Vec<ResolvedOccurrence>, ExpansionError> {
        if event.transparent {
            log::debug!("transparent event skipped: {}", event.summary);
            return Ok(Vec::new());
        }

        let span = event.span().max(Duration::zero());
        let (window_start, window_end) = target.window();
        let out_of_range = || ExpansionError::OutOfRange(span);

        let mut starts = match event.rrule.as_deref().map(str::trim) {
            Some(rule) if !rule.is_empty() => rule::rule_starts(
                &event.start,
                rule,
                window_start
                    .checked_sub_signed(span)
                    .and_then(|start| start.checked_sub_signed(Duration::seconds(1)))
                    .ok_or_else(out_of_range)?,
                window_end
                    .checked_add_signed(Duration::seconds(1))
                    .ok_or_else(out_of_range)?,
                self.limit,
            )?,
            _ => vec![event.start.clone()],
        };
        starts.extend(event.rdates.iter().cloned());
        starts.retain(|start| !is_excluded(event, start));

        let mut periods: Vec<(DateTime<Utc>, EventTime)> = starts
            .into_iter()
            .map(|start| (start.instant(), start))
            .filter(|(instant, _)| overlaps(*instant, span, window_start, window_end))
            .collect();
        periods.sort_by_key(|(instant, _)| *instant);
        periods.dedup_by_key(|(instant, _)| *instant);

        periods
            .into_iter()
            .filter(|(_, start)| start.to_string().starts_with(target.plain()))
            .map(|(_, start)| {
                let end = start.shifted(span).ok_or_else(out_of_range)?;
                Ok(ResolvedOccurrence::instance(event, target.midnight(), start, end))
            })
            .collect()
    }
}

impl Default for OccurrenceExpander {
    fn default() -> Self {
        Self::new(DEFAULT_EXPANSION_LIMIT)
    }
}

/// EXDATE check. Date-valued exceptions remove the whole day.
fn is_excluded(event: &Event, start: &EventTime) -> bool {
    event.exdates.iter().any(|exdate| match exdate {
        EventTime::Date(day) => *day == start.local_date(),
        _ => exdate.instant() == start.instant(),
    })
}

fn overlaps(
    start: DateTime<Utc>,
    span: Duration,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> bool {
    if start >= window_end {
        return false;
    }

    if span == Duration::zero() {
        start >= window_start
    } else {
        start
            .checked_add_signed(span)
            .map_or(true, |end| end > window_start)
    }
}
