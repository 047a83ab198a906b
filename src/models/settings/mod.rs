// Settings module
// Agenda settings, read from a TOML file

use serde::Deserialize;

/// Settings for the agenda binary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// ICS or webcal URL used when none is given on the command line
    pub webcal_url: Option<String>,
    /// Leave out events whose busy status is `OOF`
    pub hide_out_of_office: bool,
    /// Upper bound of rule instances generated per recurring event
    pub expansion_limit: u16,
    pub fetch: FetchSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webcal_url: None,
            hide_out_of_office: false,
            expansion_limit: 100,
            fetch: FetchSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    pub max_response_bytes: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_retries: 2,
            retry_delay_ms: 400,
            max_response_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), String> {
        if self.expansion_limit == 0 {
            return Err("expansion_limit must be greater than 0".to_string());
        }

        if self.fetch.timeout_secs == 0 {
            return Err("fetch.timeout_secs must be greater than 0".to_string());
        }

        if self.fetch.max_response_bytes == 0 {
            return Err("fetch.max_response_bytes must be greater than 0".to_string());
        }

        Ok(())
    }
}
