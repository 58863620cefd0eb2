use chrono::{Datelike, NaiveDate};

use crate::storage::entities::Series;

pub const WEEKDAY_COLUMNS: usize = 7;

/// One heatmap row: the counts of one ISO week, Monday first. Boundary weeks
/// shared with an adjacent year keep `None` cells for the days that fall
/// outside the target year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    /// ISO week number, which near year boundaries may belong to the
    /// adjacent year (week 52/53 at the top, week 1 at the bottom).
    pub week: u32,
    pub cells: [Option<i64>; WEEKDAY_COLUMNS],
}

impl WeekRow {
    fn new(week: u32) -> Self {
        Self {
            week,
            cells: [None; WEEKDAY_COLUMNS],
        }
    }
}

/// Dense week-by-weekday expansion of a sparse series over one calendar
/// year. Derived fresh for every render, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGrid {
    pub year: i32,
    pub rows: Vec<WeekRow>,
}

impl YearGrid {
    /// Largest count in the grid, used to scale cell intensity.
    pub fn max_count(&self) -> i64 {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().flatten())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Number of dates covered by the grid.
    pub fn cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.iter().flatten().count())
            .sum()
    }
}

/// Expands `series` into a [YearGrid] covering Jan 1 to Dec 31 of `year`
/// inclusive. Every date of the year gets exactly one cell, 0 when the
/// series has nothing logged for it. A new row starts whenever the ISO week
/// changes, so rows come out in calendar order with week 1 of the target
/// year at the top.
pub fn build_grid(series: &Series, year: i32) -> YearGrid {
    let start = NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st always exists");
    let end = NaiveDate::from_ymd_opt(year, 12, 31).expect("December 31st always exists");

    let mut rows: Vec<WeekRow> = vec![];
    // Keyed by ISO (week year, week) because week numbers alone repeat at
    // the year's edges.
    let mut current_week: Option<(i32, u32)> = None;

    for date in start.iter_days().take_while(|date| *date <= end) {
        let iso = date.iso_week();
        if current_week != Some((iso.year(), iso.week())) {
            rows.push(WeekRow::new(iso.week()));
            current_week = Some((iso.year(), iso.week()));
        }

        let column = date.weekday().num_days_from_monday() as usize;
        let row = rows
            .last_mut()
            .expect("a row is pushed before any cell is filled");
        row.cells[column] = Some(series.count_for(date));
    }

    YearGrid { year, rows }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::storage::entities::{Observation, Series};

    use super::build_grid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn covers_every_date_of_a_leap_year() {
        let grid = build_grid(&Series::new(), 2024);
        assert_eq!(grid.cell_count(), 366);
    }

    #[test]
    fn covers_every_date_of_a_regular_year() {
        let grid = build_grid(&Series::new(), 2023);
        assert_eq!(grid.cell_count(), 365);
    }

    #[test]
    fn logged_count_lands_in_its_week_and_weekday_cell() {
        // 2024-01-01 is a Monday in ISO week 1 of 2024.
        let series = Series::from_iter([Observation::new(date(2024, 1, 1), 5)]);
        let grid = build_grid(&series, 2024);

        assert_eq!(grid.rows[0].week, 1);
        assert_eq!(grid.rows[0].cells[0], Some(5));

        let total: i64 = grid
            .rows
            .iter()
            .flat_map(|row| row.cells.iter().flatten())
            .sum();
        assert_eq!(total, 5, "every other cell should be 0");
    }

    #[test]
    fn unlogged_dates_default_to_zero() {
        let grid = build_grid(&Series::new(), 2024);
        assert!(grid
            .rows
            .iter()
            .flat_map(|row| row.cells.iter().flatten())
            .all(|&count| count == 0));
        assert_eq!(grid.max_count(), 0);
    }

    #[test]
    fn leading_boundary_week_is_partial() {
        // 2027-01-01 is a Friday, so ISO assigns it to week 53 of 2026.
        let grid = build_grid(&Series::new(), 2027);

        let first = &grid.rows[0];
        assert_eq!(first.week, 53);
        assert_eq!(first.cells[..4], [None; 4]);
        assert_eq!(first.cells[4], Some(0));
    }

    #[test]
    fn trailing_boundary_week_is_partial() {
        // 2024-12-30 (Monday) and 2024-12-31 belong to ISO week 1 of 2025.
        let grid = build_grid(&Series::new(), 2024);

        let last = grid.rows.last().unwrap();
        assert_eq!(last.week, 1);
        assert_eq!(last.cells[0], Some(0));
        assert_eq!(last.cells[1], Some(0));
        assert_eq!(last.cells[2..], [None; 5]);
    }

    #[test]
    fn rows_follow_calendar_order() {
        let grid = build_grid(&Series::new(), 2024);
        // Week 1 of 2024 at the top, weeks 2..=52 in order, then the
        // boundary week 1 of 2025.
        assert_eq!(grid.rows.len(), 53);
        assert_eq!(grid.rows[0].week, 1);
        assert_eq!(grid.rows[51].week, 52);
        assert_eq!(grid.rows[52].week, 1);
    }

    #[test]
    fn counts_outside_the_year_are_ignored() {
        let series = Series::from_iter([
            Observation::new(date(2023, 12, 31), 9),
            Observation::new(date(2025, 1, 1), 9),
        ]);
        let grid = build_grid(&series, 2024);
        assert_eq!(grid.max_count(), 0);
    }
}
