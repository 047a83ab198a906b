use anyhow::{anyhow, Result};
use ical::parser::ical::component::{IcalCalendar, IcalEvent, IcalTimeZone};
use ical::property::Property;

use super::utils::{find_param, parse_duration, parse_event_time, parse_event_times, unescape_text};
use crate::models::calendar::{CalendarComponent, CalendarModel, TimeZoneInfo};
use crate::models::event::{Event, EventBuilder};

/// Parse ICS text into a calendar model.
///
/// The `ical` parser groups components by kind, so the model lists each
/// calendar's time zones first, then its events, then the remaining
/// components. Order within a kind is kept.
pub(super) fn from_str(ics_content: &str) -> Result<CalendarModel> {
    let parser = ical::IcalParser::new(ics_content.as_bytes());
    let mut components = Vec::new();
    let mut calendars = 0usize;

    for calendar in parser {
        let calendar = calendar.map_err(|err| anyhow!("Failed to parse ICS content: {:?}", err))?;
        calendars += 1;
        push_components(&calendar, &mut components);
    }

    if calendars == 0 {
        return Err(anyhow!("ICS content contains no VCALENDAR"));
    }

    log::debug!(
        "parsed {} calendar(s) with {} components",
        calendars,
        components.len()
    );
    Ok(CalendarModel::new(components))
}

fn push_components(calendar: &IcalCalendar, components: &mut Vec<CalendarComponent>) {
    components.extend(
        calendar
            .timezones
            .iter()
            .map(|timezone| CalendarComponent::TimeZone(timezone_info(timezone))),
    );

    for ical_event in &calendar.events {
        match parse_event(ical_event) {
            Ok(Some(event)) => components.push(CalendarComponent::Event(event)),
            Ok(None) => {}
            Err(err) => log::warn!("skipping unreadable VEVENT: {:#}", err),
        }
    }

    let others = [
        ("VTODO", calendar.todos.len()),
        ("VJOURNAL", calendar.journals.len()),
        ("VFREEBUSY", calendar.free_busys.len()),
    ];
    for (name, count) in others {
        components.extend((0..count).map(|_| CalendarComponent::Unknown(name.to_string())));
    }
}

fn timezone_info(timezone: &IcalTimeZone) -> TimeZoneInfo {
    TimeZoneInfo {
        tzid: timezone
            .properties
            .iter()
            .find(|property| property.name.eq_ignore_ascii_case("TZID"))
            .and_then(|property| property.value.clone()),
    }
}

/// `Ok(None)` for events without DTSTART.
fn parse_event(ical_event: &IcalEvent) -> Result<Option<Event>> {
    let mut builder = Event::builder();
    let mut has_start = false;

    for property in &ical_event.properties {
        if property.name.eq_ignore_ascii_case("DTSTART") && property.value.is_some() {
            has_start = true;
        }
        builder = parse_event_property(property, builder)?;
    }

    if !has_start {
        log::warn!("skipping VEVENT without DTSTART");
        return Ok(None);
    }

    builder.build().map(Some).map_err(|err| anyhow!(err))
}

fn parse_event_property(property: &Property, builder: EventBuilder) -> Result<EventBuilder> {
    let Some(value) = property.value.as_deref() else {
        return Ok(builder);
    };
    let params = &property.params;

    let builder = match property.name.to_ascii_uppercase().as_str() {
        "UID" => builder.uid(value),
        "SUMMARY" => builder.summary(unescape_text(value)),
        "DTSTART" => builder.start(parse_event_time(value, params)?),
        "DTEND" => builder.end(parse_event_time(value, params)?),
        "DURATION" => builder.duration(parse_duration(value)?),
        "SEQUENCE" => match value.trim().parse::<i64>() {
            Ok(sequence) => builder.sequence(sequence),
            Err(_) => {
                log::warn!("ignoring SEQUENCE '{}'", value);
                builder
            }
        },
        "TRANSP" => builder.transparent(value.trim().eq_ignore_ascii_case("TRANSPARENT")),
        "X-MICROSOFT-CDO-BUSYSTATUS" => builder.busy_status(value.trim()),
        "RRULE" => builder.rrule(value.trim()),
        "EXDATE" => parse_event_times(value, params)?
            .into_iter()
            .fold(builder, |builder, date| builder.exdate(date)),
        "RDATE" => {
            if find_param(params, "VALUE").map_or(false, |kind| kind.eq_ignore_ascii_case("PERIOD")) {
                log::warn!("ignoring RDATE periods '{}'", value);
                builder
            } else {
                parse_event_times(value, params)?
                    .into_iter()
                    .fold(builder, |builder, date| builder.rdate(date))
            }
        }
        _ => builder,
    };

    Ok(builder)
}
