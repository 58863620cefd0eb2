use std::fmt::Display;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};
use tracing::debug;

use crate::{
    storage::{entities::Observation, series_storage::SeriesStorage},
    utils::time::{format_date, normalize_to_date},
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(
        long = "date",
        short,
        help = "Day to log. Examples are \"today\", \"yesterday\", \"15/03/2025\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(
        long = "count",
        short,
        default_value_t = 1,
        help = "Amount to add to the day's total"
    )]
    count: i64,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Processes the `log` command. Resolves the day to log against the local
/// clock, then runs one load, merge, save cycle against the habit file.
pub fn process_log_command(
    LogCommand {
        date,
        count,
        date_style,
    }: LogCommand,
    storage: &impl SeriesStorage,
) -> Result<()> {
    let date = parse_log_date(date, date_style)?;
    log_observation(storage, Observation::new(date, count))
}

/// Merges one observation into the persisted series and prints the day's new
/// running total.
pub fn log_observation(storage: &impl SeriesStorage, observation: Observation) -> Result<()> {
    let mut series = storage.load()?;
    let total = series.apply(observation);
    storage.save(&series)?;
    debug!(
        "Logged {} for {}, total {total}",
        observation.count,
        format_date(observation.date)
    );
    println!("{}: {total}", format_date(observation.date));
    Ok(())
}

fn parse_log_date(date: Option<String>, date_style: DateStyle) -> Result<NaiveDate> {
    let now = Local::now();
    match date.map(|s| parse_date_string(&s, now, date_style.into())) {
        Some(Ok(v)) => Ok(normalize_to_date(v)),
        Some(Err(e)) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {e}"),
            )
            .into()),
        None => Ok(normalize_to_date(now)),
    }
}
