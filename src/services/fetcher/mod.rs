//! Download of ICS documents over HTTPS.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;

use crate::models::settings::FetchSettings;

/// Source of raw ICS text.
#[cfg_attr(test, mockall::automock)]
pub trait IcsProvider {
    fn fetch_ics(&self, url: &str) -> Result<String>;
}

pub struct IcsFetcher {
    client: Client,
    max_response_bytes: usize,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl IcsFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build ICS fetch HTTP client")?;

        Ok(Self {
            client,
            max_response_bytes: settings.max_response_bytes,
            max_retries: settings.max_retries,
            retry_delay_ms: settings.retry_delay_ms,
        })
    }

    /// `webcal://` is HTTPS by another name; anything else must already be
    /// HTTPS.
    pub fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();
        if let Some(rest) = url.strip_prefix("webcal://") {
            return Ok(format!("https://{}", rest));
        }

        if url.starts_with("https://") {
            Ok(url.to_string())
        } else {
            Err(anyhow!("ICS URL must use HTTPS or webcal"))
        }
    }

    fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .context("Network error during ICS fetch")?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(anyhow!("ICS fetch failed with HTTP status {}", status));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(anyhow!(
                    "ICS response too large ({} bytes > {} bytes)",
                    content_length,
                    self.max_response_bytes
                ));
            }
        }

        let bytes = response
            .bytes()
            .context("Failed to read ICS response body")?;

        if bytes.len() > self.max_response_bytes {
            return Err(anyhow!(
                "ICS response too large ({} bytes > {} bytes)",
                bytes.len(),
                self.max_response_bytes
            ));
        }

        let content = String::from_utf8(bytes.to_vec()).context("ICS response is not valid UTF-8")?;
        check_ics_content(&content)?;

        Ok(content)
    }

    /// Keep scheme and host, hide path and query: calendar URLs carry
    /// access tokens.
    fn redact_url(url: &str) -> String {
        let Some((scheme, rest)) = url.split_once("://") else {
            return "***redacted-url***".to_string();
        };

        match rest.split_once('/') {
            Some((host, _)) if !host.is_empty() => format!("{}://{}/***redacted***", scheme, host),
            _ => "***redacted-url***".to_string(),
        }
    }
}

impl IcsProvider for IcsFetcher {
    fn fetch_ics(&self, url: &str) -> Result<String> {
        let url = Self::normalize_url(url)?;
        let redacted = Self::redact_url(&url);
        let mut last_error: Option<anyhow::Error> = None;

        for attempt in 0..=self.max_retries {
            match self.fetch_once(&url) {
                Ok(content) => {
                    log::info!("fetched {} bytes of ICS from {}", content.len(), redacted);
                    return Ok(content);
                }
                Err(err) => {
                    let is_last_attempt = attempt == self.max_retries;
                    if is_last_attempt {
                        last_error = Some(err.context(format!(
                            "Failed to fetch ICS from {} after {} attempts",
                            redacted,
                            attempt + 1
                        )));
                    } else {
                        log::warn!(
                            "ICS fetch attempt {} failed for {}: {}",
                            attempt + 1,
                            redacted,
                            err
                        );
                        thread::sleep(Duration::from_millis(self.retry_delay_ms));
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("Unknown ICS fetch error")))
    }
}

fn check_ics_content(content: &str) -> Result<()> {
    if content.contains("BEGIN:VCALENDAR") {
        Ok(())
    } else {
        Err(anyhow!("Response does not appear to be valid ICS content"))
    }
}
