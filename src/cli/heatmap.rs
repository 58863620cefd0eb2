use std::io::stdout;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Parser;

use crate::{
    cli::output::{grid::build_grid, render::render_heatmap},
    storage::series_storage::SeriesStorage,
};

#[derive(Debug, Parser)]
pub struct HeatmapCommand {
    #[arg(long, short, help = "Year to display. Defaults to the current year")]
    year: Option<i32>,
}

/// Processes the `heatmap` command.
pub fn process_heatmap_command(
    HeatmapCommand { year }: HeatmapCommand,
    storage: &impl SeriesStorage,
) -> Result<()> {
    let year = year.unwrap_or_else(|| Local::now().year());
    display_heatmap(storage, year)
}

/// Loads the series, reshapes it into the year grid and draws it on stdout.
/// The grid is derived fresh on every call and discarded after drawing.
pub fn display_heatmap(storage: &impl SeriesStorage, year: i32) -> Result<()> {
    let series = storage.load()?;
    let grid = build_grid(&series, year);
    render_heatmap(&grid, &mut stdout().lock())
}
