//! Weekly aggregation of daily radiation sums, used by the bar chart.

use crate::types::frames::daily_table::DailyTable;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Mean of the present daily sums of one city over one Monday-start week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyAggregate {
    pub city: String,
    pub week_start: NaiveDate,
    pub mean_daily_sum: f64,
    pub days: usize,
}

/// The best and worst week of one city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyExtremes {
    pub city: String,
    pub best: WeeklyAggregate,
    pub worst: WeeklyAggregate,
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Groups daily sums by `(city, week)`, ordered by city then week.
///
/// Rows without a date or without a sum are ignored; a week with no present
/// value produces no aggregate.
pub fn weekly_aggregates(daily: &DailyTable) -> Vec<WeeklyAggregate> {
    let mut buckets: BTreeMap<(&str, NaiveDate), (f64, usize)> = BTreeMap::new();
    for row in daily.iter() {
        let (Some(date), Some(value)) = (row.date, row.shortwave_radiation_sum) else {
            continue;
        };
        let entry = buckets
            .entry((row.city.as_str(), week_start(date)))
            .or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((city, week_start), (sum, days))| WeeklyAggregate {
            city: city.to_string(),
            week_start,
            mean_daily_sum: sum / days as f64,
            days,
        })
        .collect()
}

/// Weeks with fewer present days only compete when a city has no fuller week.
pub const MIN_DAYS_PER_WEEK: usize = 4;

/// Picks, per city, the week with the highest and the lowest mean daily sum.
///
/// Partial weeks at either end of the fetched range (fewer than
/// [`MIN_DAYS_PER_WEEK`] present days) are left out of the ranking unless the
/// city has nothing else. Ties go to the earlier week.
pub fn best_and_worst_weeks(daily: &DailyTable) -> Vec<WeeklyExtremes> {
    let weeks = weekly_aggregates(daily);
    let mut extremes = Vec::new();

    for city_weeks in weeks.chunk_by(|a, b| a.city == b.city) {
        let has_full_week = city_weeks.iter().any(|w| w.days >= MIN_DAYS_PER_WEEK);
        let ranked: Vec<&WeeklyAggregate> = city_weeks
            .iter()
            .filter(|w| !has_full_week || w.days >= MIN_DAYS_PER_WEEK)
            .collect();
        let Some((first, rest)) = ranked.split_first() else {
            continue;
        };

        let (mut best, mut worst) = (*first, *first);
        for &week in rest {
            if week.mean_daily_sum > best.mean_daily_sum {
                best = week;
            }
            if week.mean_daily_sum < worst.mean_daily_sum {
                worst = week;
            }
        }
        extremes.push(WeeklyExtremes {
            city: first.city.clone(),
            best: best.clone(),
            worst: worst.clone(),
        });
    }
    extremes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::weather_data::daily::DailyRecord;

    fn day(city: &str, y: i32, m: u32, d: u32, sum: Option<f64>) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(y, m, d),
            shortwave_radiation_sum: sum,
            city: city.to_string(),
            sum_7d_mean: None,
        }
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-06-05 is a Wednesday, 2024-06-09 a Sunday.
        let monday = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(week_start(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()), monday);
        assert_eq!(week_start(NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()), monday);
        assert_eq!(week_start(monday), monday);
    }

    #[test]
    fn test_aggregates_skip_missing_values() {
        let table = DailyTable::new(vec![
            day("A", 2024, 6, 3, Some(100.0)),
            day("A", 2024, 6, 4, None),
            day("A", 2024, 6, 5, Some(300.0)),
            day("A", 2024, 6, 10, None),
        ]);

        let weeks = weekly_aggregates(&table);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].mean_daily_sum, 200.0);
        assert_eq!(weeks[0].days, 2);
    }

    #[test]
    fn test_best_and_worst_per_city() {
        let table = DailyTable::new(vec![
            day("B", 2024, 6, 3, Some(50.0)),
            day("A", 2024, 6, 3, Some(100.0)),
            day("A", 2024, 6, 10, Some(400.0)),
            day("A", 2024, 6, 17, Some(250.0)),
            day("B", 2024, 6, 10, Some(60.0)),
        ]);

        let extremes = best_and_worst_weeks(&table);
        assert_eq!(extremes.len(), 2);

        assert_eq!(extremes[0].city, "A");
        assert_eq!(extremes[0].best.week_start, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(extremes[0].worst.week_start, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());

        assert_eq!(extremes[1].city, "B");
        assert_eq!(extremes[1].best.mean_daily_sum, 60.0);
        assert_eq!(extremes[1].worst.mean_daily_sum, 50.0);
    }

    #[test]
    fn test_single_week_is_both_best_and_worst() {
        let table = DailyTable::new(vec![day("A", 2024, 6, 4, Some(10.0))]);
        let extremes = best_and_worst_weeks(&table);
        assert_eq!(extremes[0].best, extremes[0].worst);
    }

    #[test]
    fn test_ties_prefer_earlier_week() {
        let table = DailyTable::new(vec![
            day("A", 2024, 6, 3, Some(10.0)),
            day("A", 2024, 6, 10, Some(10.0)),
        ]);
        let extremes = best_and_worst_weeks(&table);
        let first = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(extremes[0].best.week_start, first);
        assert_eq!(extremes[0].worst.week_start, first);
    }

    #[test]
    fn test_no_values_gives_no_extremes() {
        let table = DailyTable::new(vec![day("A", 2024, 6, 3, None)]);
        assert!(best_and_worst_weeks(&table).is_empty());
    }

    #[test]
    fn test_partial_weeks_are_not_ranked_next_to_full_weeks() {
        // 2024-06-02 is a lone Sunday; 2024-06-17 a lone Monday.
        let mut rows = vec![
            day("A", 2024, 6, 2, Some(9000.0)),
            day("A", 2024, 6, 17, Some(1.0)),
        ];
        rows.extend((3..=9).map(|d| day("A", 2024, 6, d, Some(300.0))));
        rows.extend((10..=16).map(|d| day("A", 2024, 6, d, Some(200.0))));
        let table = DailyTable::new(rows);

        let extremes = best_and_worst_weeks(&table);
        assert_eq!(extremes[0].best.week_start, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(extremes[0].best.mean_daily_sum, 300.0);
        assert_eq!(extremes[0].worst.week_start, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(extremes[0].worst.days, 7);
    }
}
