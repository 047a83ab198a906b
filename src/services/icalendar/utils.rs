use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::event::EventTime;

/// Parameters of an `ical` property
pub(super) type Params = Option<Vec<(String, Vec<String>)>>;

pub(super) fn unescape_text(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => unescaped.push('\n'),
            Some(other @ (',' | ';' | '\\')) => unescaped.push(other),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }

    unescaped
}

/// First value of parameter `name`, quotes removed.
pub(super) fn find_param<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params
        .as_ref()?
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .and_then(|(_, values)| values.first())
        .map(|value| value.trim_matches('"'))
}

/// Parse a DATE or DATE-TIME value with its `VALUE` / `TZID` parameters.
pub(super) fn parse_event_time(value: &str, params: &Params) -> Result<EventTime> {
    let value = value.trim();
    let is_date = find_param(params, "VALUE")
        .map(|kind| kind.eq_ignore_ascii_case("DATE"))
        .unwrap_or(false)
        || value.len() == 8;

    if is_date {
        let date = NaiveDate::parse_from_str(value, "%Y%m%d")
            .with_context(|| format!("Invalid date: {}", value))?;
        return Ok(EventTime::Date(date));
    }

    if let Some(utc) = value.strip_suffix('Z') {
        let naive = parse_naive(utc)?;
        return Ok(EventTime::Utc(Utc.from_utc_datetime(&naive)));
    }

    let local = parse_naive(value)?;
    match find_param(params, "TZID") {
        Some(tzid) if !tzid.is_empty() => Ok(EventTime::Zoned {
            local,
            tzid: tzid.to_string(),
        }),
        _ => Ok(EventTime::Floating(local)),
    }
}

/// Parse a comma separated EXDATE / RDATE list.
pub(super) fn parse_event_times(value: &str, params: &Params) -> Result<Vec<EventTime>> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_event_time(part, params))
        .collect()
}

fn parse_naive(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y%m%dT%H%M%S")
        .with_context(|| format!("Invalid datetime: {}", value))
}

/// Parse an RFC 5545 DURATION such as `PT1H30M`, `P1D` or `-P1W`.
pub(super) fn parse_duration(value: &str) -> Result<Duration> {
    let value = value.trim();
    let (negative, rest) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let rest = rest
        .strip_prefix('P')
        .ok_or_else(|| anyhow!("Invalid duration: {}", value))?;

    let mut total = Duration::zero();
    let mut number = String::new();
    let mut in_time = false;
    let mut seen_unit = false;

    for ch in rest.chars() {
        match ch {
            '0'..='9' => number.push(ch),
            'T' if !in_time && number.is_empty() => in_time = true,
            unit => {
                let amount: i64 = number
                    .parse()
                    .with_context(|| format!("Invalid duration: {}", value))?;
                number.clear();
                let part = match (unit, in_time) {
                    ('W', false) => Duration::try_weeks(amount),
                    ('D', false) => Duration::try_days(amount),
                    ('H', true) => Duration::try_hours(amount),
                    ('M', true) => Duration::try_minutes(amount),
                    ('S', true) => Duration::try_seconds(amount),
                    _ => return Err(anyhow!("Invalid duration: {}", value)),
                };
                total = part
                    .and_then(|part| total.checked_add(&part))
                    .ok_or_else(|| anyhow!("Invalid duration: {} is out of range", value))?;
                seen_unit = true;
            }
        }
    }

    if !number.is_empty() || !seen_unit {
        return Err(anyhow!("Invalid duration: {}", value));
    }

    Ok(if negative { -total } else { total })
}
