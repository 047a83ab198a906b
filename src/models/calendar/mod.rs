// Calendar module
// Parsed calendar document handed to the day filter

use crate::models::event::Event;

/// A VTIMEZONE definition. Only its identifier is kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimeZoneInfo {
    pub tzid: Option<String>,
}

/// One top-level component of a calendar document
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarComponent {
    Event(Event),
    TimeZone(TimeZoneInfo),
    /// Any other component, e.g. `VTODO`
    Unknown(String),
}

/// Parsed calendar document; components in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CalendarModel {
    components: Vec<CalendarComponent>,
}

impl CalendarModel {
    pub fn new(components: Vec<CalendarComponent>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[CalendarComponent] {
        &self.components
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.components.iter().filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(event),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }
}

impl FromIterator<CalendarComponent> for CalendarModel {
    fn from_iter<I: IntoIterator<Item = CalendarComponent>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
