// Agenda line formatting

use crate::models::occurrence::ResolvedOccurrence;

/// Busy status Outlook uses for out-of-office entries
pub const OUT_OF_OFFICE: &str = "OOF";

const MILLIS_PER_MINUTE: i64 = 60 * 1000;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Render an occurrence as `"<h>h <m>m (<busy status>) <summary>"`.
///
/// The duration is measured between the occurrence's own start and end.
/// Hours wrap at 24, so a 30 hour event shows as `6h`.
pub fn format(occurrence: &ResolvedOccurrence) -> String {
    format!(
        "{} ({}) {}",
        format_millis(occurrence.elapsed().num_milliseconds()),
        out_of_office_flag(occurrence),
        occurrence.summary()
    )
}

/// `"<h>h <m>m"`, hours modulo 24 and minutes modulo 60.
pub fn format_millis(millis: i64) -> String {
    let millis = millis.abs();
    let hours = (millis / MILLIS_PER_HOUR) % 24;
    let minutes = (millis / MILLIS_PER_MINUTE) % 60;
    format!("{}h {}m", hours, minutes)
}

/// Busy status of the source event, empty if it has none.
pub fn out_of_office_flag(occurrence: &ResolvedOccurrence) -> &str {
    occurrence.event.busy_status.as_deref().unwrap_or("")
}

pub fn is_out_of_office(occurrence: &ResolvedOccurrence) -> bool {
    out_of_office_flag(occurrence) == OUT_OF_OFFICE
}
