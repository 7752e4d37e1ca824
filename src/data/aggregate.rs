use std::collections::BTreeMap;

use super::model::{RentalDataset, WeatherSituation};

/// How many hours the "busiest hours" table keeps.
pub const TOP_HOURS: usize = 5;

// ---------------------------------------------------------------------------
// Summary rows
// ---------------------------------------------------------------------------

/// Total rentals under one weather situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherTotal {
    pub weather: WeatherSituation,
    pub total: u64,
}

/// Total rentals during one hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourTotal {
    pub hour: u8,
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Aggregation over a filtered view
// ---------------------------------------------------------------------------

/// Sum rental counts per weather situation over the records selected by
/// `indices`. One row per situation present in the view, in code order;
/// situations with no records produce no row.
pub fn rentals_by_weather(dataset: &RentalDataset, indices: &[usize]) -> Vec<WeatherTotal> {
    let mut totals: BTreeMap<WeatherSituation, u64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *totals.entry(rec.weather).or_insert(0) += u64::from(rec.count);
    }
    totals
        .into_iter()
        .map(|(weather, total)| WeatherTotal { weather, total })
        .collect()
}

/// Sum rental counts per hour of day over the records selected by `indices`.
/// One row per hour present in the view, ascending by hour.
pub fn rentals_by_hour(dataset: &RentalDataset, indices: &[usize]) -> Vec<HourTotal> {
    let mut totals: BTreeMap<u8, u64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        *totals.entry(rec.hour).or_insert(0) += u64::from(rec.count);
    }
    totals
        .into_iter()
        .map(|(hour, total)| HourTotal { hour, total })
        .collect()
}

/// Select the `k` busiest hours from a by-hour table, descending by total.
///
/// Fewer than `k` distinct hours returns all of them. Equal totals order by
/// lower hour first, so the selection is stable across runs.
pub fn top_hours(by_hour: &[HourTotal], k: usize) -> Vec<HourTotal> {
    let mut rows = by_hour.to_vec();
    rows.sort_by(|a, b| b.total.cmp(&a.total).then(a.hour.cmp(&b.hour)));
    rows.truncate(k);
    rows
}

// ---------------------------------------------------------------------------
// Summaries – everything the charts consume, recomputed per range change
// ---------------------------------------------------------------------------

/// The three summary tables plus the grand total of the filtered view.
#[derive(Debug, Clone, Default)]
pub struct Summaries {
    pub by_weather: Vec<WeatherTotal>,
    pub by_hour: Vec<HourTotal>,
    pub top_hours: Vec<HourTotal>,
    /// Sum of rental counts over the filtered view. Equals the column sums
    /// of `by_weather` and `by_hour`.
    pub total_rentals: u64,
}

impl Summaries {
    /// Recompute all tables from the current filtered view.
    pub fn compute(dataset: &RentalDataset, indices: &[usize]) -> Self {
        let by_weather = rentals_by_weather(dataset, indices);
        let by_hour = rentals_by_hour(dataset, indices);
        let top = top_hours(&by_hour, TOP_HOURS);
        let total_rentals = by_hour.iter().map(|row| row.total).sum();

        Summaries {
            by_weather,
            by_hour,
            top_hours: top,
            total_rentals,
        }
    }
}
