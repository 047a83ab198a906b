// Occurrence module
// An event instance resolved onto the requested day

use chrono::{DateTime, Duration, Local};

use crate::models::event::{Event, EventTime};

/// An event, or one instance of a recurring event, that takes place on the
/// requested day.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOccurrence {
    /// Copy of the source event
    pub event: Event,
    /// Set to the day's midnight for instances produced by expansion
    pub recurrence_id: Option<DateTime<Local>>,
    pub start: EventTime,
    pub end: EventTime,
}

impl ResolvedOccurrence {
    /// The event itself, matched on its own start.
    pub fn single(event: &Event) -> Self {
        Self {
            event: event.clone(),
            recurrence_id: None,
            start: event.start.clone(),
            end: event.end.clone(),
        }
    }

    /// An expanded instance of a recurring event.
    pub fn instance(
        event: &Event,
        recurrence_id: DateTime<Local>,
        start: EventTime,
        end: EventTime,
    ) -> Self {
        Self {
            event: event.clone(),
            recurrence_id: Some(recurrence_id),
            start,
            end,
        }
    }

    pub fn summary(&self) -> &str {
        &self.event.summary
    }

    pub fn is_expanded(&self) -> bool {
        self.recurrence_id.is_some()
    }

    /// Elapsed time between this occurrence's own start and end.
    pub fn elapsed(&self) -> Duration {
        let elapsed = self.end.instant() - self.start.instant();
        if elapsed < Duration::zero() {
            -elapsed
        } else {
            elapsed
        }
    }
}
