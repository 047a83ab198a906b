use crate::models::event::Event;

/// True if the rendered start of `event` begins with the plain
/// `YYYYMMDD` form of the requested day.
///
/// This is a textual comparison: a start written in UTC (`...Z`) is
/// compared on its UTC day, not on the requester's local day.
pub fn matches(event: &Event, plain_date: &str) -> bool {
    event.start.to_string().starts_with(plain_date)
}

/// Events carrying a SEQUENCE may have instances beyond their own start.
pub fn is_recurring(event: &Event) -> bool {
    event.is_recurring()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventTime;
    use chrono::{NaiveDate, TimeZone, Utc};
    use test_case::test_case;

    fn event_starting(start: EventTime) -> Event {
        Event::builder()
            .summary("Planning")
            .start(start)
            .build()
            .unwrap()
    }

    fn floating(day: u32, hour: u32) -> EventTime {
        EventTime::Floating(
            NaiveDate::from_ymd_opt(2021, 4, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
        )
    }

    #[test_case(floating(21, 9), true; "same day")]
    #[test_case(floating(21, 0), true; "midnight")]
    #[test_case(floating(22, 0), false; "next midnight")]
    #[test_case(floating(20, 23), false; "day before")]
    #[test_case(EventTime::Date(NaiveDate::from_ymd_opt(2021, 4, 21).unwrap()), true; "all day")]
    fn test_matches(start: EventTime, expected: bool) {
        assert_eq!(matches(&event_starting(start), "20210421"), expected);
    }

    #[test]
    fn test_utc_start_compares_on_utc_day() {
        // 22:00Z on the 20th is already the 21st east of UTC, still no match
        let start = EventTime::Utc(Utc.with_ymd_and_hms(2021, 4, 20, 22, 0, 0).unwrap());
        assert!(!matches(&event_starting(start), "20210421"));
    }

    #[test]
    fn test_is_recurring_requires_sequence() {
        let event = event_starting(floating(21, 9));
        assert!(!is_recurring(&event));

        let event = Event {
            sequence: Some(0),
            ..event
        };
        assert!(is_recurring(&event));
    }
}
