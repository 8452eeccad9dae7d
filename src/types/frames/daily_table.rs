//! Contains the `DailyTable` structure, the tidy table of daily shortwave radiation sums.

use crate::types::weather_data::daily::DailyRecord;
use polars::prelude::{Column, DataFrame, PolarsResult};

pub const DATE_COLUMN: &str = "date";
pub const SHORTWAVE_RADIATION_SUM_COLUMN: &str = "shortwave_radiation_sum";
pub const CITY_COLUMN: &str = "city";
pub const SUM_7D_MEAN_COLUMN: &str = "sum_7d_mean";

/// A tidy table of daily radiation sums: one row per reported day per city.
///
/// Fresh tables from [`crate::build_tidy`] are in API order and have no rolling
/// mean. After [`crate::compute_rolling`] the table is sorted ascending by
/// `(city, date)`, contains only rows with a valid date and carries the
/// `sum_7d_mean` column.
///
/// # Example
///
/// ```
/// use irradiance::{DailyRecord, DailyTable};
/// use chrono::NaiveDate;
///
/// let table: DailyTable = (1..=3)
///     .map(|d| DailyRecord {
///         date: NaiveDate::from_ymd_opt(2024, 6, d),
///         shortwave_radiation_sum: Some(d as f64 * 100.0),
///         city: "Montreal".to_string(),
///         sum_7d_mean: None,
///     })
///     .collect();
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.cities(), vec!["Montreal"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyTable {
    rows: Vec<DailyRecord>,
}

impl DailyTable {
    pub fn new(rows: Vec<DailyRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[DailyRecord] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [DailyRecord] {
        &mut self.rows
    }

    pub fn into_rows(self) -> Vec<DailyRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DailyRecord> {
        self.rows.iter()
    }

    /// Appends all rows of `other`, preserving their order.
    pub fn append(&mut self, other: DailyTable) {
        self.rows.extend(other.rows);
    }

    /// Drops every row without a valid date and returns how many were removed.
    pub fn retain_valid(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(DailyRecord::has_valid_date);
        before - self.rows.len()
    }

    /// Stable sort by `(city, date)`. Rows with the same key keep their relative order.
    pub fn sort_by_city_and_date(&mut self) {
        self.rows
            .sort_by(|a, b| a.city.cmp(&b.city).then_with(|| a.date.cmp(&b.date)));
    }

    /// Distinct city labels in order of first appearance.
    pub fn cities(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.city.as_str()) {
                seen.push(row.city.as_str());
            }
        }
        seen
    }

    /// Rows belonging to `city`, in table order.
    pub fn rows_for_city<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a DailyRecord> {
        self.rows.iter().filter(move |r| r.city == city)
    }

    /// Converts the table into a Polars `DataFrame` with the columns
    /// `date` (Date), `shortwave_radiation_sum` (Float64, nullable), `city` (String)
    /// and `sum_7d_mean` (Float64, nullable).
    ///
    /// # Errors
    ///
    /// Returns a [`polars::prelude::PolarsError`] if the frame cannot be assembled.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<_> = self.rows.iter().map(|r| r.date).collect();
        let sums: Vec<_> = self.rows.iter().map(|r| r.shortwave_radiation_sum).collect();
        let cities: Vec<_> = self.rows.iter().map(|r| r.city.clone()).collect();
        let means: Vec<_> = self.rows.iter().map(|r| r.sum_7d_mean).collect();

        DataFrame::new(vec![
            Column::new(DATE_COLUMN.into(), dates),
            Column::new(SHORTWAVE_RADIATION_SUM_COLUMN.into(), sums),
            Column::new(CITY_COLUMN.into(), cities),
            Column::new(SUM_7D_MEAN_COLUMN.into(), means),
        ])
    }
}

impl FromIterator<DailyRecord> for DailyTable {
    fn from_iter<I: IntoIterator<Item = DailyRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for DailyTable {
    type Item = DailyRecord;
    type IntoIter = std::vec::IntoIter<DailyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polars::prelude::DataType;

    fn record(city: &str, day: Option<u32>, sum: Option<f64>) -> DailyRecord {
        DailyRecord {
            date: day.and_then(|d| NaiveDate::from_ymd_opt(2024, 3, d)),
            shortwave_radiation_sum: sum,
            city: city.to_string(),
            sum_7d_mean: None,
        }
    }

    #[test]
    fn test_sort_by_city_and_date_groups_cities() {
        let mut table = DailyTable::new(vec![
            record("B", Some(2), Some(1.0)),
            record("A", Some(3), Some(2.0)),
            record("B", Some(1), Some(3.0)),
            record("A", Some(1), Some(4.0)),
        ]);
        table.sort_by_city_and_date();

        let keys: Vec<(&str, u32)> = table
            .iter()
            .map(|r| {
                use chrono::Datelike;
                (r.city.as_str(), r.date.unwrap().day())
            })
            .collect();
        assert_eq!(keys, vec![("A", 1), ("A", 3), ("B", 1), ("B", 2)]);
    }

    #[test]
    fn test_cities_in_first_appearance_order() {
        let table = DailyTable::new(vec![
            record("Teresina", Some(1), None),
            record("Montreal", Some(1), None),
            record("Teresina", Some(2), None),
        ]);
        assert_eq!(table.cities(), vec!["Teresina", "Montreal"]);
        assert_eq!(table.rows_for_city("Teresina").count(), 2);
    }

    #[test]
    fn test_retain_valid_keeps_missing_sums() {
        let mut table = DailyTable::new(vec![
            record("A", None, Some(1.0)),
            record("A", Some(2), None),
        ]);
        assert_eq!(table.retain_valid(), 1);
        assert_eq!(table.rows(), &[record("A", Some(2), None)]);
    }

    #[test]
    fn test_to_frame_schema() -> Result<(), Box<dyn std::error::Error>> {
        let table = DailyTable::new(vec![record("A", Some(1), Some(5.0)), record("A", Some(2), None)]);
        let df = table.to_frame()?;

        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["date", "shortwave_radiation_sum", "city", "sum_7d_mean"]
        );
        assert_eq!(df.column(DATE_COLUMN)?.dtype(), &DataType::Date);
        assert_eq!(df.column(SUM_7D_MEAN_COLUMN)?.null_count(), 2);
        Ok(())
    }
}
