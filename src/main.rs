// Day Agenda
// Main entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use day_agenda::services::agenda::AgendaService;
use day_agenda::services::day_filter::DayFilter;
use day_agenda::services::fetcher::IcsFetcher;
use day_agenda::services::icalendar::ICalendarService;
use day_agenda::services::recurrence::OccurrenceExpander;
use day_agenda::services::settings::SettingsService;

const NO_INPUT_MESSAGE: &str = "Please enter ICS / Webcal URL and pick a date";
const NO_EVENTS_MESSAGE: &str = "no events found!";

/// List the calendar entries of one day, with their durations.
#[derive(Debug, Parser)]
#[command(name = "day-agenda", version, about)]
struct Cli {
    /// Day to list, as YYYY-MM-DD
    date: Option<String>,

    /// ICS or webcal URL of the calendar
    #[arg(short, long)]
    url: Option<String>,

    /// Read the calendar from a local .ics file instead of a URL
    #[arg(short, long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leave out out-of-office entries
    #[arg(long)]
    hide_out_of_office: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{:#}", err);
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = SettingsService::load(cli.config.as_deref())?;

    let Some(date) = cli.date.filter(|date| !date.trim().is_empty()) else {
        println!("{}", NO_INPUT_MESSAGE);
        return Ok(ExitCode::FAILURE);
    };

    let filter = DayFilter::new(OccurrenceExpander::new(settings.expansion_limit));
    let fetcher = IcsFetcher::new(&settings.fetch)?;
    let agenda = AgendaService::new(fetcher, filter)
        .hide_out_of_office(cli.hide_out_of_office || settings.hide_out_of_office);

    let resolution = if let Some(path) = cli.file {
        let calendar = ICalendarService::new().import_from_file(&path)?;
        agenda.resolve(&calendar, &date)
    } else {
        let Some(url) = cli.url.or(settings.webcal_url) else {
            println!("{}", NO_INPUT_MESSAGE);
            return Ok(ExitCode::FAILURE);
        };
        agenda.entries_for_day(&url, &date)?
    };

    for issue in &resolution.issues {
        log::warn!("{}", issue);
    }

    if resolution.is_empty() {
        println!("{}", NO_EVENTS_MESSAGE);
    } else {
        println!("{}", resolution.to_text());
    }

    Ok(ExitCode::SUCCESS)
}
