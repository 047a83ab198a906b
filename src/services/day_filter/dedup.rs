use crate::models::event::Event;
use crate::models::occurrence::ResolvedOccurrence;

/// True if an entry for the same logical event was already kept.
///
/// Entries are the same when their summaries are equal and, if both carry
/// a DURATION, their durations are equal too. Two instances of one
/// meeting on the same day therefore collapse into a single entry.
pub fn is_duplicate(candidate: &Event, added: &[ResolvedOccurrence]) -> bool {
    added
        .iter()
        .any(|occurrence| same_entry(&occurrence.event, candidate))
}

fn same_entry(kept: &Event, candidate: &Event) -> bool {
    if kept.summary != candidate.summary {
        return false;
    }

    match (kept.duration, candidate.duration) {
        (Some(kept), Some(candidate)) => kept == candidate,
        _ => true,
    }
}
