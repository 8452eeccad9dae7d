//! Per-city trailing rolling mean over the daily radiation sums.

use crate::types::frames::daily_table::DailyTable;
use crate::types::frames::hourly_table::HourlyTable;
use log::debug;
use std::collections::VecDeque;

/// Number of trailing rows in the `sum_7d_mean` window.
pub const WINDOW: usize = 7;
/// Minimum number of present values in the window before a mean is emitted.
pub const MIN_PERIODS: usize = 3;

/// Trailing mean over the last `window` positions of `values`.
///
/// A missing value still occupies a position in the window but adds nothing to the
/// sum or to the observation count. The output at position `i` is the mean of the
/// present values in `values[i + 1 - window..=i]`, or `None` if fewer than
/// `min_periods` (and at least one) values are present there.
///
/// ```
/// use irradiance::rolling_mean;
///
/// let sums = [Some(100.0), Some(200.0), Some(300.0), Some(400.0)];
/// assert_eq!(
///     rolling_mean(&sums, 7, 3),
///     vec![None, None, Some(200.0), Some(250.0)]
/// );
/// ```
pub fn rolling_mean(values: &[Option<f64>], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let min_periods = min_periods.max(1);
    let mut trailing: VecDeque<Option<f64>> = VecDeque::with_capacity(window);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0_f64;
    let mut count = 0usize;

    for value in values {
        if window == 0 {
            out.push(None);
            continue;
        }
        if trailing.len() == window {
            if let Some(Some(old)) = trailing.pop_front() {
                sum -= old;
                count -= 1;
            }
        }
        trailing.push_back(*value);
        if let Some(v) = value {
            sum += v;
            count += 1;
        }
        // Drop accumulated rounding once the window holds no values.
        if count == 0 {
            sum = 0.0;
        }

        out.push((count >= min_periods).then(|| sum / count as f64));
    }
    out
}

/// Cleans both tables and computes `sum_7d_mean` for every daily row.
///
/// 1. Hourly rows without a timestamp and daily rows without a date are removed.
///    Rows with a missing radiation value are kept.
/// 2. Daily rows are stably sorted by `(city, date)`, which makes each city's
///    series contiguous.
/// 3. Each city partition is scanned chronologically with [`rolling_mean`]
///    (`WINDOW` = 7, `MIN_PERIODS` = 3); partitions never share a window.
///
/// The hourly table is returned in its original order.
pub fn compute_rolling(mut hourly: HourlyTable, mut daily: DailyTable) -> (HourlyTable, DailyTable) {
    let dropped_hourly = hourly.retain_valid();
    let dropped_daily = daily.retain_valid();
    if dropped_hourly > 0 || dropped_daily > 0 {
        debug!(
            "Dropped {} hourly and {} daily rows with unparsable time",
            dropped_hourly, dropped_daily
        );
    }

    daily.sort_by_city_and_date();

    for partition in daily.rows_mut().chunk_by_mut(|a, b| a.city == b.city) {
        let sums: Vec<Option<f64>> = partition
            .iter()
            .map(|r| r.shortwave_radiation_sum)
            .collect();
        let means = rolling_mean(&sums, WINDOW, MIN_PERIODS);
        for (row, mean) in partition.iter_mut().zip(means) {
            row.sum_7d_mean = mean;
        }
    }

    (hourly, daily)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::weather_data::daily::DailyRecord;
    use crate::types::weather_data::hourly::HourlyRecord;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, 1).map(|d| d + Duration::days(offset))
    }

    fn daily(city: &str, offset: Option<i64>, sum: Option<f64>) -> DailyRecord {
        DailyRecord {
            date: offset.and_then(day),
            shortwave_radiation_sum: sum,
            city: city.to_string(),
            sum_7d_mean: None,
        }
    }

    fn means_for(table: &DailyTable, city: &str) -> Vec<Option<f64>> {
        table.rows_for_city(city).map(|r| r.sum_7d_mean).collect()
    }

    #[test]
    fn test_eight_consecutive_days() {
        let table: DailyTable = (0..8)
            .map(|i| daily("X", Some(i), Some(100.0 * (i + 1) as f64)))
            .collect();

        let (_, out) = compute_rolling(HourlyTable::default(), table);

        assert_eq!(
            means_for(&out, "X"),
            vec![
                None,
                None,
                Some(200.0),
                Some(250.0),
                Some(300.0),
                Some(350.0),
                Some(400.0),
                Some(500.0), // mean(200..=800)
            ]
        );
    }

    #[test]
    fn test_window_slides_after_seven_rows() {
        let values: Vec<Option<f64>> = (1..=10).map(|v| Some(v as f64)).collect();
        let means = rolling_mean(&values, 7, 3);
        // Position 9 covers values 4..=10.
        assert_eq!(means[9], Some(7.0));
        // Position 6 is the first full window: 1..=7.
        assert_eq!(means[6], Some(4.0));
    }

    #[test]
    fn test_missing_values_occupy_window_positions() {
        let values = vec![Some(1.0), None, Some(3.0), Some(5.0), None];
        let means = rolling_mean(&values, 7, 3);
        // Only two present values until position 3.
        assert_eq!(means, vec![None, None, None, Some(3.0), Some(3.0)]);

        // A missing value pushed out of a 3-wide window stops counting against it.
        let narrow = rolling_mean(&[None, Some(2.0), Some(4.0), Some(6.0)], 3, 3);
        assert_eq!(narrow, vec![None, None, None, Some(4.0)]);
    }

    #[test]
    fn test_running_accumulator_matches_window_recomputation() {
        let values: Vec<Option<f64>> = (0..200)
            .map(|i| (i % 5 != 0 && i % 13 != 0).then(|| (i as f64) * 0.37 + 1.1))
            .collect();
        let means = rolling_mean(&values, WINDOW, MIN_PERIODS);

        for (i, mean) in means.iter().enumerate() {
            let start = (i + 1).saturating_sub(WINDOW);
            let present: Vec<f64> = values[start..=i].iter().flatten().copied().collect();
            let expected = (present.len() >= MIN_PERIODS)
                .then(|| present.iter().sum::<f64>() / present.len() as f64);
            match (mean, expected) {
                (Some(got), Some(want)) => assert!((got - want).abs() < 1e-9, "position {i}"),
                (got, want) => assert_eq!(*got, want, "position {i}"),
            }
        }
    }

    #[test]
    fn test_all_missing_window_stays_missing() {
        assert_eq!(rolling_mean(&[None, None, None, None], 7, 0), vec![None; 4]);
    }

    #[test]
    fn test_zero_window_yields_nothing() {
        assert_eq!(rolling_mean(&[Some(1.0), Some(2.0)], 0, 1), vec![None, None]);
    }

    #[test]
    fn test_cities_do_not_share_windows() {
        // Interleaved raw order: A and B alternate.
        let rows: Vec<DailyRecord> = (0..6)
            .flat_map(|i| {
                vec![
                    daily("B", Some(i), Some(1000.0)),
                    daily("A", Some(i), Some(1.0)),
                ]
            })
            .collect();

        let (_, out) = compute_rolling(HourlyTable::default(), DailyTable::new(rows));

        let a = means_for(&out, "A");
        let b = means_for(&out, "B");
        assert_eq!(a, vec![None, None, Some(1.0), Some(1.0), Some(1.0), Some(1.0)]);
        assert_eq!(
            b,
            vec![None, None, Some(1000.0), Some(1000.0), Some(1000.0), Some(1000.0)]
        );
        // A's rows come first and are contiguous.
        assert!(out.rows()[..6].iter().all(|r| r.city == "A"));
    }

    #[test]
    fn test_output_sorted_by_city_then_date() {
        let table = DailyTable::new(vec![
            daily("B", Some(1), Some(1.0)),
            daily("A", Some(2), Some(1.0)),
            daily("B", Some(0), Some(1.0)),
            daily("A", Some(0), Some(1.0)),
        ]);
        let (_, out) = compute_rolling(HourlyTable::default(), table);

        let keys: Vec<(String, Option<NaiveDate>)> =
            out.iter().map(|r| (r.city.clone(), r.date)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_invalid_dates_never_enter_a_window() {
        let table = DailyTable::new(vec![
            daily("X", Some(0), Some(10.0)),
            daily("X", None, Some(1_000_000.0)),
            daily("X", Some(1), Some(20.0)),
            daily("X", Some(2), Some(30.0)),
        ]);
        let (_, out) = compute_rolling(HourlyTable::default(), table);

        assert_eq!(out.len(), 3);
        assert_eq!(means_for(&out, "X"), vec![None, None, Some(20.0)]);
    }

    #[test]
    fn test_hourly_is_cleaned_but_not_reordered() {
        let ts = |h: u32| day(0).and_then(|d| d.and_hms_opt(h, 0, 0));
        let hourly = HourlyTable::new(vec![
            HourlyRecord { timestamp: ts(5), shortwave_radiation: Some(5.0), city: "B".into() },
            HourlyRecord { timestamp: None, shortwave_radiation: Some(0.0), city: "B".into() },
            HourlyRecord { timestamp: ts(1), shortwave_radiation: None, city: "A".into() },
        ]);

        let (out, _) = compute_rolling(hourly, DailyTable::default());

        let hours: Vec<_> = out.iter().map(|r| r.timestamp).collect();
        assert_eq!(hours, vec![ts(5), ts(1)]);
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let build = || {
            DailyTable::new(
                (0..20)
                    .map(|i| daily(if i % 3 == 0 { "A" } else { "B" }, Some(i), Some(i as f64 * 1.1)))
                    .collect(),
            )
        };
        let (_, first) = compute_rolling(HourlyTable::default(), build());
        let (_, second) = compute_rolling(HourlyTable::default(), build());
        assert_eq!(first, second);
    }
}
