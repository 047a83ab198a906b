use super::import;
use crate::models::calendar::CalendarModel;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Service for reading iCalendar (.ics) documents
#[derive(Debug, Clone, Copy, Default)]
pub struct ICalendarService;

impl ICalendarService {
    /// Create a new ICalendarService
    pub fn new() -> Self {
        Self
    }

    /// Import a calendar from an iCalendar formatted string
    pub fn import_calendar(&self, ics_content: &str) -> Result<CalendarModel> {
        import::from_str(ics_content)
    }

    /// Import a calendar from a .ics file on disk
    pub fn import_from_file(&self, path: &Path) -> Result<CalendarModel> {
        let content =
            fs::read_to_string(path).context(format!("Failed to read .ics file: {:?}", path))?;
        self.import_calendar(&content)
    }
}
