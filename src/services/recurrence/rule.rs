use chrono::{DateTime, Utc};
use rrule::{RRuleSet, Tz as RRuleTz};

use super::ExpansionError;
use crate::models::event::EventTime;

/// Rule instances starting inside `[after, before]`, in the same kind of
/// value as `dtstart`.
pub(super) fn rule_starts(
    dtstart: &EventTime,
    rule: &str,
    after: DateTime<Utc>,
    before: DateTime<Utc>,
    limit: u16,
) -> Result<Vec<EventTime>, ExpansionError> {
    let text = format!("{}\nRRULE:{}", dtstart_line(dtstart)?, rule);
    let set = text
        .parse::<RRuleSet>()
        .map_err(|err| ExpansionError::InvalidRule {
            rule: rule.to_string(),
            reason: err.to_string(),
        })?;

    let result = set
        .after(after.with_timezone(&RRuleTz::UTC))
        .before(before.with_timezone(&RRuleTz::UTC))
        .all(limit);

    if result.limited {
        log::warn!("RRULE '{}' hit the limit of {} instances", rule, limit);
    }

    Ok(result
        .dates
        .into_iter()
        .map(|date| as_event_time(dtstart, date))
        .collect())
}

/// DTSTART line for the rule set. Dates and floating times are handed to
/// `rrule` as local wall-clock times.
fn dtstart_line(dtstart: &EventTime) -> Result<String, ExpansionError> {
    let wall_clock = dtstart.wall_clock().format("%Y%m%dT%H%M%S");

    match dtstart {
        EventTime::Date(_) | EventTime::Floating(_) => Ok(format!("DTSTART:{}", wall_clock)),
        EventTime::Utc(_) => Ok(format!("DTSTART:{}Z", wall_clock)),
        EventTime::Zoned { tzid, .. } => {
            let tz = dtstart
                .timezone()
                .ok_or_else(|| ExpansionError::UnknownTimezone(tzid.clone()))?;
            Ok(format!("DTSTART;TZID={}:{}", tz.name(), wall_clock))
        }
    }
}

fn as_event_time(dtstart: &EventTime, date: DateTime<RRuleTz>) -> EventTime {
    match dtstart {
        EventTime::Date(_) => EventTime::Date(date.naive_local().date()),
        EventTime::Floating(_) => EventTime::Floating(date.naive_local()),
        EventTime::Utc(_) => EventTime::Utc(date.with_timezone(&Utc)),
        EventTime::Zoned { tzid, .. } => EventTime::Zoned {
            local: date.naive_local(),
            tzid: tzid.clone(),
        },
    }
}
