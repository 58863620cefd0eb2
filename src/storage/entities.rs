use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// One logged habit event. This is also the csv row type, so its field order
/// defines the `date,count` column order of the persisted file.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize, Clone, Copy)]
pub struct Observation {
    pub date: NaiveDate,
    pub count: i64,
}

impl Observation {
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self { date, count }
    }
}

/// Date indexed running totals for all logged activity. Dates are unique
/// keys; counts for repeated observations on the same date are summed. Only
/// dates with at least one logged observation are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    totals: BTreeMap<NaiveDate, i64>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges an observation into the series and returns the new running
    /// total for its date.
    pub fn apply(&mut self, observation: Observation) -> i64 {
        let total = self.totals.entry(observation.date).or_insert(0);
        *total += observation.count;
        *total
    }

    pub fn count_for(&self, date: NaiveDate) -> i64 {
        self.totals.get(&date).copied().unwrap_or(0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.totals.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Entries in date order.
    pub fn iter(&self) -> impl Iterator<Item = Observation> + '_ {
        self.totals
            .iter()
            .map(|(&date, &count)| Observation { date, count })
    }
}

impl FromIterator<Observation> for Series {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        let mut series = Series::new();
        for observation in iter {
            series.apply(observation);
        }
        series
    }
}
