pub mod heatmap;
pub mod log;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    storage::{entities::Observation, series_storage::CsvSeriesStorage},
    utils::{
        dir::create_application_default_path, logging::enable_logging, time::normalize_to_date,
    },
};

use self::{
    heatmap::{display_heatmap, process_heatmap_command, HeatmapCommand},
    log::{log_observation, process_log_command, LogCommand},
};

#[derive(Parser, Debug)]
#[command(name = "Habitmap", version, long_about = None)]
#[command(
    about = "Command line habit tracker with a yearly activity heatmap",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        help = "Data directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Add an observation to a day's running total")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "Display the activity heatmap for a year")]
    Heatmap {
        #[command(flatten)]
        command: HeatmapCommand,
    },
}

const DATA_FILE_NAME: &str = "habits.csv";

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let data_dir = match args.dir {
        Some(dir) => dir,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&data_dir, logging_level, args.log)?;

    let storage = CsvSeriesStorage::new(data_dir.join(DATA_FILE_NAME))?;

    match args.commands {
        Some(Commands::Log { command }) => process_log_command(command, &storage),
        Some(Commands::Heatmap { command }) => process_heatmap_command(command, &storage),
        None => {
            // Bare invocation logs a count of 1 for today, then shows the
            // current year.
            let today = normalize_to_date(Local::now());
            log_observation(&storage, Observation::new(today, 1))?;
            display_heatmap(&storage, today.year())
        }
    }
}
