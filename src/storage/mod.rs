//! Storage is organized through [series_storage::CsvSeriesStorage].
//! The basic idea is:
//!  - All logged activity lives in a single csv file with a `date,count` header.
//!  - Each row is a running total for one calendar day.
//!  - Saving rewrites the whole file, so a failed run never leaves a partial file.

pub mod entities;
pub mod series_storage;
