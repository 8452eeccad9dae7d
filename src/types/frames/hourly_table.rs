//! Contains the `HourlyTable` structure, the tidy table of hourly shortwave radiation.

use crate::types::weather_data::hourly::HourlyRecord;
use polars::prelude::{Column, DataFrame, PolarsResult};

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const SHORTWAVE_RADIATION_COLUMN: &str = "shortwave_radiation";
pub const CITY_COLUMN: &str = "city";

/// A tidy table of hourly radiation observations: one row per reported hour per city.
///
/// Rows are kept in insertion order. Nothing in the pipeline re-sorts hourly data;
/// the only transformation applied after merging is the removal of rows whose
/// timestamp could not be parsed.
///
/// Tables are built by [`crate::build_tidy`], concatenated by [`crate::merge_all`]
/// and cleaned by [`crate::compute_rolling`]. Use [`HourlyTable::to_frame`] to get a
/// Polars `DataFrame` for export or further analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyTable {
    rows: Vec<HourlyRecord>,
}

impl HourlyTable {
    pub fn new(rows: Vec<HourlyRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[HourlyRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<HourlyRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HourlyRecord> {
        self.rows.iter()
    }

    /// Appends all rows of `other`, preserving their order.
    pub fn append(&mut self, other: HourlyTable) {
        self.rows.extend(other.rows);
    }

    /// Drops every row without a valid timestamp and returns how many were removed.
    pub fn retain_valid(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(HourlyRecord::has_valid_timestamp);
        before - self.rows.len()
    }

    /// Converts the table into a Polars `DataFrame` with the columns
    /// `timestamp` (Datetime), `shortwave_radiation` (Float64, nullable) and `city` (String).
    ///
    /// # Errors
    ///
    /// Returns a [`polars::prelude::PolarsError`] if the frame cannot be assembled.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let timestamps: Vec<_> = self.rows.iter().map(|r| r.timestamp).collect();
        let radiation: Vec<_> = self.rows.iter().map(|r| r.shortwave_radiation).collect();
        let cities: Vec<_> = self.rows.iter().map(|r| r.city.clone()).collect();

        DataFrame::new(vec![
            Column::new(TIMESTAMP_COLUMN.into(), timestamps),
            Column::new(SHORTWAVE_RADIATION_COLUMN.into(), radiation),
            Column::new(CITY_COLUMN.into(), cities),
        ])
    }
}

impl FromIterator<HourlyRecord> for HourlyTable {
    fn from_iter<I: IntoIterator<Item = HourlyRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for HourlyTable {
    type Item = HourlyRecord;
    type IntoIter = std::vec::IntoIter<HourlyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
