use std::{
    fs::File,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use tracing::debug;

use super::entities::{Observation, Series};

/// Interface for abstracting storage of the activity series.
pub trait SeriesStorage {
    /// Reads the whole persisted series. A missing file is not an error, it
    /// just means nothing has been logged yet.
    fn load(&self) -> Result<Series>;

    /// Rewrites the whole persisted series, superseding the previous file.
    fn save(&self, series: &Series) -> Result<()>;
}

/// The main realization of [SeriesStorage]. Stores the series as a csv file
/// with a `date,count` header, dates in `%Y-%m-%d` form.
pub struct CsvSeriesStorage {
    data_file: PathBuf,
}

impl CsvSeriesStorage {
    pub fn new(data_file: PathBuf) -> Result<Self, std::io::Error> {
        if let Some(parent) = data_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { data_file })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    fn read_series(file: &File) -> Result<Series> {
        let mut reader = csv::Reader::from_reader(file);
        let mut series = Series::new();
        for row in reader.deserialize::<Observation>() {
            // Duplicate dates in a hand-edited file collapse through the same
            // summing rule as repeated log events.
            series.apply(row.context("Malformed row in habit file")?);
        }
        Ok(series)
    }

    fn write_series(file: &File, series: &Series) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        // The header is written unconditionally so an empty series still
        // round-trips through a well-formed file.
        writer.write_record(["date", "count"])?;
        for observation in series.iter() {
            writer.serialize(observation)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SeriesStorage for CsvSeriesStorage {
    fn load(&self) -> Result<Series> {
        let file = match File::open(&self.data_file) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No habit file at {:?}, starting empty", self.data_file);
                return Ok(Series::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open habit file {:?}", self.data_file));
            }
        };

        file.lock_shared()?;
        let result = Self::read_series(&file)
            .with_context(|| format!("Failed to parse habit file {:?}", self.data_file));
        file.unlock()?;
        result
    }

    fn save(&self, series: &Series) -> Result<()> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.data_file)
            .with_context(|| format!("Failed to open habit file {:?}", self.data_file))?;

        // Semi-safe acquire-release for the file
        file.lock_exclusive()?;
        let result = Self::write_series(&file, series)
            .with_context(|| format!("Failed to write habit file {:?}", self.data_file));
        file.unlock()?;
        result
    }
}
