use chrono::NaiveDate;

use crate::color::WeatherColors;
use crate::data::aggregate::Summaries;
use crate::data::filter::{filtered_indices, DateRange};
use crate::data::model::RentalDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which of the hourly chart tabs is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourlyTab {
    #[default]
    Bar,
    Line,
    Top5,
}

impl HourlyTab {
    pub fn title(self) -> &'static str {
        match self {
            HourlyTab::Bar => "Bar Hours",
            HourlyTab::Line => "Line Hours",
            HourlyTab::Top5 => "Top 5",
        }
    }
}

/// The full UI state, independent of rendering.
///
/// The dataset is the only owned copy of the data; the filtered view and the
/// summary tables are caches derived from it and the active range, rebuilt
/// together by [`AppState::refilter`] so they can never disagree.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<RentalDataset>,

    /// Active date range; always valid against the dataset span.
    pub range: Option<DateRange>,

    /// Indices of records inside the current range (cached).
    pub visible_indices: Vec<usize>,

    /// Summary tables derived from `visible_indices` (cached).
    pub summaries: Summaries,

    /// Colour assignment for the weather charts.
    pub weather_colors: WeatherColors,

    /// Active tab in the hourly chart section.
    pub hourly_tab: HourlyTab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            range: None,
            visible_indices: Vec::new(),
            summaries: Summaries::default(),
            weather_colors: WeatherColors::default(),
            hourly_tab: HourlyTab::default(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, defaulting the range to the full span.
    pub fn set_dataset(&mut self, dataset: RentalDataset) {
        self.range = Some(DateRange::full_span(&dataset));
        self.dataset = Some(dataset);
        self.refilter();
        self.status_message = None;
        self.loading = false;
    }

    /// Apply a new user-selected range. Inverted input is rejected and the
    /// previous range kept; out-of-span dates are clamped to the dataset
    /// span before filtering.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        match DateRange::clamped(start, end, dataset) {
            Ok(range) => {
                self.range = Some(range);
                self.status_message = None;
                self.refilter();
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Reset the range back to the full dataset span.
    pub fn reset_range(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.range = Some(DateRange::full_span(dataset));
            self.status_message = None;
            self.refilter();
        }
    }

    /// Recompute the filtered view and all summary tables from the current
    /// range. Called after every dataset or range change.
    pub fn refilter(&mut self) {
        let (Some(dataset), Some(range)) = (&self.dataset, self.range) else {
            self.visible_indices.clear();
            self.summaries = Summaries::default();
            return;
        };
        self.visible_indices = filtered_indices(dataset, range);
        self.summaries = Summaries::compute(dataset, &self.visible_indices);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{RentalRecord, WeatherSituation};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_dataset() -> RentalDataset {
        RentalDataset::from_records(vec![
            RentalRecord {
                date: date(2011, 1, 1),
                hour: 8,
                weather: WeatherSituation::Clear,
                count: 50,
            },
            RentalRecord {
                date: date(2011, 1, 2),
                hour: 8,
                weather: WeatherSituation::Mist,
                count: 30,
            },
            RentalRecord {
                date: date(2011, 1, 3),
                hour: 17,
                weather: WeatherSituation::Clear,
                count: 90,
            },
        ])
        .unwrap()
    }

    #[test]
    fn set_dataset_defaults_to_full_span() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        let range = state.range.unwrap();
        assert_eq!(range.start(), date(2011, 1, 1));
        assert_eq!(range.end(), date(2011, 1, 3));
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.summaries.total_rentals, 170);
    }

    #[test]
    fn narrowing_the_range_shrinks_view_and_summaries_together() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        state.set_range(date(2011, 1, 2), date(2011, 1, 3));

        assert_eq!(state.visible_indices, vec![1, 2]);
        assert_eq!(state.summaries.total_rentals, 120);
        assert_eq!(state.summaries.by_weather.len(), 2);
        assert_eq!(state.summaries.by_hour.len(), 2);
    }

    #[test]
    fn inverted_range_keeps_previous_selection() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        let before = state.range;

        state.set_range(date(2011, 1, 3), date(2011, 1, 1));

        assert_eq!(state.range, before);
        assert_eq!(state.visible_indices.len(), 3);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn reset_restores_the_full_span() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        state.set_range(date(2011, 1, 2), date(2011, 1, 2));
        assert_eq!(state.visible_indices.len(), 1);

        state.reset_range();
        assert_eq!(state.visible_indices.len(), 3);
        assert_eq!(state.summaries.total_rentals, 170);
    }

    #[test]
    fn empty_range_degrades_to_empty_summaries() {
        let mut state = AppState::default();
        state.set_dataset(
            RentalDataset::from_records(vec![
                RentalRecord {
                    date: date(2011, 1, 1),
                    hour: 8,
                    weather: WeatherSituation::Clear,
                    count: 50,
                },
                RentalRecord {
                    date: date(2011, 1, 9),
                    hour: 9,
                    weather: WeatherSituation::Clear,
                    count: 60,
                },
            ])
            .unwrap(),
        );
        state.set_range(date(2011, 1, 3), date(2011, 1, 5));

        assert!(state.visible_indices.is_empty());
        assert!(state.summaries.by_weather.is_empty());
        assert!(state.summaries.by_hour.is_empty());
        assert!(state.summaries.top_hours.is_empty());
        assert_eq!(state.summaries.total_rentals, 0);
    }
}
