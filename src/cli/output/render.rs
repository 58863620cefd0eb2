use std::io::Write;

use ansi_term::{Colour, Style};
use anyhow::Result;

use super::grid::{YearGrid, WEEKDAY_COLUMNS};

/// 256-color greens from faint to saturated, one per intensity level.
const GREEN_RAMP: [u8; 5] = [22, 28, 34, 40, 46];

/// Dim gray for days that exist in the year but have nothing logged,
/// visually distinct from out-of-year cells which stay blank.
const ZERO_CELL: u8 = 237;

const WEEKDAY_LABELS: [&str; WEEKDAY_COLUMNS] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Maps a count onto the green ramp. 0 is the empty bucket, `GREEN_RAMP.len()`
/// the brightest. Monotone in `count`; negative totals land in the empty
/// bucket.
pub fn intensity_bucket(count: i64, max: i64) -> usize {
    if count <= 0 || max <= 0 {
        return 0;
    }
    let levels = GREEN_RAMP.len() as u128;
    let bucket = (count as u128 * levels).div_ceil(max as u128);
    bucket.clamp(1, levels) as usize
}

fn cell_style(bucket: usize) -> Style {
    let colour = if bucket == 0 {
        Colour::Fixed(ZERO_CELL)
    } else {
        Colour::Fixed(GREEN_RAMP[bucket - 1])
    };
    Style::new().on(colour)
}

/// Draws the grid as a colored mesh, one row per ISO week from the top of
/// the year down, one column per weekday, with an intensity legend.
pub fn render_heatmap(grid: &YearGrid, out: &mut impl Write) -> Result<()> {
    let max = grid.max_count();

    writeln!(out, "Activity - {}", grid.year)?;

    write!(out, "     ")?;
    for label in WEEKDAY_LABELS {
        write!(out, "{label} ")?;
    }
    writeln!(out)?;

    for row in &grid.rows {
        write!(out, "W{:>2}  ", row.week)?;
        for cell in row.cells {
            match cell {
                Some(count) => {
                    let style = cell_style(intensity_bucket(count, max));
                    write!(out, "{} ", style.paint("  "))?;
                }
                // Day belongs to the adjacent year, leave the cell blank.
                None => write!(out, "   ")?,
            }
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    write!(out, "     less ")?;
    write!(out, "{} ", cell_style(0).paint("  "))?;
    for bucket in 1..=GREEN_RAMP.len() {
        write!(out, "{} ", cell_style(bucket).paint("  "))?;
    }
    writeln!(out, "more (max {max})")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{
        cli::output::grid::build_grid,
        storage::entities::{Observation, Series},
    };
    use chrono::NaiveDate;

    use super::{intensity_bucket, render_heatmap, GREEN_RAMP};

    #[test]
    fn zero_and_negative_counts_use_the_empty_bucket() {
        assert_eq!(intensity_bucket(0, 10), 0);
        assert_eq!(intensity_bucket(-5, 10), 0);
    }

    #[test]
    fn maximum_count_uses_the_brightest_bucket() {
        assert_eq!(intensity_bucket(10, 10), GREEN_RAMP.len());
        assert_eq!(intensity_bucket(1, 1), GREEN_RAMP.len());
    }

    #[test]
    fn small_counts_round_up_to_the_first_bucket() {
        assert_eq!(intensity_bucket(1, 1000), 1);
    }

    #[test]
    fn buckets_are_monotone() {
        let max = 100;
        let mut previous = 0;
        for count in 0..=max {
            let bucket = intensity_bucket(count, max);
            assert!(bucket >= previous, "bucket dropped at count {count}");
            previous = bucket;
        }
        assert_eq!(previous, GREEN_RAMP.len());
    }

    #[test]
    fn renders_one_line_per_week_plus_chrome() {
        let series = Series::from_iter([Observation::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            5,
        )]);
        let grid = build_grid(&series, 2024);

        let mut out = Vec::new();
        render_heatmap(&grid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // Title, weekday header, the weeks, a blank line, the legend.
        assert_eq!(text.lines().count(), grid.rows.len() + 4);
        assert!(text.starts_with("Activity - 2024\n"));
        assert!(text.contains("Mo Tu We Th Fr Sa Su"));
        assert!(text.contains("max 5"));
    }

    #[test]
    fn out_of_year_cells_stay_blank() {
        // 2027 starts mid-week, so the first data row opens with blanks.
        let grid = build_grid(&Series::new(), 2027);

        let mut out = Vec::new();
        render_heatmap(&grid, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let first_week = text.lines().nth(2).unwrap();
        assert!(first_week.starts_with("W53     "));
    }
}
