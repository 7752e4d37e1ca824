use chrono::NaiveDate;

use super::error::DataError;
use super::model::RentalDataset;

// ---------------------------------------------------------------------------
// DateRange – the single filter predicate of the dashboard
// ---------------------------------------------------------------------------

/// An inclusive `[start, end]` calendar-date range with `start <= end`.
///
/// User input only enters through [`DateRange::clamped`], so the filter never
/// sees an inverted range: inversion is rejected with a typed error and
/// out-of-span dates are clamped to the dataset span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validate a raw `(start, end)` pair against the dataset span.
    ///
    /// `start > end` is rejected; dates outside `[first, last]` are pulled in
    /// to the span boundary, matching how the source dashboard's date picker
    /// bounds its input.
    pub fn clamped(
        start: NaiveDate,
        end: NaiveDate,
        dataset: &RentalDataset,
    ) -> Result<Self, DataError> {
        if start > end {
            return Err(DataError::StartAfterEnd { start, end });
        }
        Ok(DateRange {
            start: start.clamp(dataset.first_date, dataset.last_date),
            end: end.clamp(dataset.first_date, dataset.last_date),
        })
    }

    /// The range covering the entire dataset span, the picker default.
    pub fn full_span(dataset: &RentalDataset) -> Self {
        DateRange {
            start: dataset.first_date,
            end: dataset.last_date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies in `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Return indices of records whose date falls within `range`, in dataset
/// order. An empty result is valid; downstream aggregation yields empty
/// summary tables for it.
pub fn filtered_indices(dataset: &RentalDataset, range: DateRange) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.date))
        .map(|(i, _)| i)
        .collect()
}
