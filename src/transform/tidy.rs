//! Turns the parallel-array series of one forecast response into tidy row tables.

use crate::types::frames::daily_table::DailyTable;
use crate::types::frames::hourly_table::HourlyTable;
use crate::types::series::{DailySeries, HourlySeries};
use crate::types::weather_data::daily::DailyRecord;
use crate::types::weather_data::hourly::HourlyRecord;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an Open-Meteo local time string. A bare date maps to midnight.
pub(crate) fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Parses a calendar date. A full date-time is accepted and truncated to its date.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(raw).map(|dt| dt.date()))
}

/// Pairs every time string with the value at the same index.
///
/// The row count is always the length of `times`. Missing trailing values become
/// `None`; surplus values are ignored. Both cases are logged.
fn align<'a>(
    city: &str,
    series: &str,
    times: &'a [String],
    values: &'a [Option<f64>],
) -> impl Iterator<Item = (&'a str, Option<f64>)> + 'a {
    if values.len() != times.len() {
        warn!(
            "{} series for '{}' has {} time entries but {} values; rows follow the time axis",
            series,
            city,
            times.len(),
            values.len()
        );
    }
    times
        .iter()
        .enumerate()
        .map(move |(i, t)| (t.as_str(), values.get(i).copied().flatten()))
}

/// Builds the hourly and daily tidy tables for one city.
///
/// Every row is tagged with `city_label`. Unparsable time strings do not fail the
/// batch; the row is kept with a `None` timestamp/date and removed later by
/// [`crate::compute_rolling`]. No sorting happens here.
///
/// # Example
///
/// ```
/// use irradiance::{build_tidy, DailySeries, HourlySeries};
///
/// let hourly = HourlySeries {
///     time: vec!["2024-06-01T00:00".into(), "not a time".into()],
///     shortwave_radiation: vec![Some(0.0), Some(12.0)],
///     unit: "W/m²".into(),
/// };
/// let daily = DailySeries {
///     time: vec!["2024-06-01".into()],
///     shortwave_radiation_sum: vec![Some(5120.0)],
///     unit: "Wh/m²".into(),
/// };
///
/// let (h, d) = build_tidy("Montreal,CA", &hourly, &daily);
/// assert_eq!(h.len(), 2);
/// assert!(h.rows()[1].timestamp.is_none());
/// assert_eq!(d.rows()[0].city, "Montreal,CA");
/// ```
pub fn build_tidy(
    city_label: &str,
    hourly: &HourlySeries,
    daily: &DailySeries,
) -> (HourlyTable, DailyTable) {
    let hourly_table = align(
        city_label,
        "hourly",
        &hourly.time,
        &hourly.shortwave_radiation,
    )
    .map(|(time, value)| HourlyRecord {
        timestamp: parse_timestamp(time),
        shortwave_radiation: value,
        city: city_label.to_string(),
    })
    .collect();

    let daily_table = align(
        city_label,
        "daily",
        &daily.time,
        &daily.shortwave_radiation_sum,
    )
    .map(|(time, value)| DailyRecord {
        date: parse_date(time),
        shortwave_radiation_sum: value,
        city: city_label.to_string(),
        sum_7d_mean: None,
    })
    .collect();

    (hourly_table, daily_table)
}
