//! Simple habit tracker for the terminal. Logs one count per day into a csv
//! file and draws a year of activity as a colored heatmap, without requiring
//! any runtimes or leaving the terminal.
//!

pub mod cli;
pub mod storage;
pub mod utils;
