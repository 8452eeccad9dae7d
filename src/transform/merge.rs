use crate::transform::error::TransformError;
use crate::types::frames::daily_table::DailyTable;
use crate::types::frames::hourly_table::HourlyTable;

/// Concatenates per-city tables row-wise into one hourly and one daily table.
///
/// Row order follows the order of the input lists, so city order on the command
/// line is preserved in the (unsorted) result.
///
/// # Errors
///
/// Returns [`TransformError::EmptyInput`] when either list is empty. Callers are
/// expected to have skipped cities that could not be resolved before getting here.
pub fn merge_all(
    hourly_tables: Vec<HourlyTable>,
    daily_tables: Vec<DailyTable>,
) -> Result<(HourlyTable, DailyTable), TransformError> {
    if hourly_tables.is_empty() || daily_tables.is_empty() {
        return Err(TransformError::EmptyInput {
            hourly: hourly_tables.len(),
            daily: daily_tables.len(),
        });
    }

    let mut hourly = HourlyTable::new(Vec::with_capacity(
        hourly_tables.iter().map(HourlyTable::len).sum(),
    ));
    for table in hourly_tables {
        hourly.append(table);
    }

    let mut daily = DailyTable::new(Vec::with_capacity(
        daily_tables.iter().map(DailyTable::len).sum(),
    ));
    for table in daily_tables {
        daily.append(table);
    }

    Ok((hourly, daily))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::weather_data::daily::DailyRecord;
    use crate::types::weather_data::hourly::HourlyRecord;
    use chrono::NaiveDate;

    fn daily_table(city: &str, days: &[u32]) -> DailyTable {
        days.iter()
            .map(|d| DailyRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, *d),
                shortwave_radiation_sum: Some(*d as f64),
                city: city.to_string(),
                sum_7d_mean: None,
            })
            .collect()
    }

    fn hourly_table(city: &str, n: usize) -> HourlyTable {
        (0..n)
            .map(|h| HourlyRecord {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|d| d.and_hms_opt(h as u32, 0, 0)),
                shortwave_radiation: None,
                city: city.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_merge_concatenates_in_input_order() {
        let (hourly, daily) = merge_all(
            vec![hourly_table("B", 2), hourly_table("A", 3)],
            vec![daily_table("B", &[2, 1]), daily_table("A", &[5])],
        )
        .unwrap();

        assert_eq!(hourly.len(), 5);
        assert_eq!(hourly.rows()[0].city, "B");
        assert_eq!(hourly.rows()[4].city, "A");

        let cities: Vec<&str> = daily.iter().map(|r| r.city.as_str()).collect();
        assert_eq!(cities, vec!["B", "B", "A"]);
        // No re-sorting at merge time.
        assert_eq!(daily.rows()[0].date, NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn test_merge_zero_tables_fails() {
        let result = merge_all(vec![], vec![]);
        assert!(matches!(
            result,
            Err(TransformError::EmptyInput { hourly: 0, daily: 0 })
        ));
    }

    #[test]
    fn test_merge_accepts_empty_tables_inside_non_empty_list() {
        let (hourly, daily) =
            merge_all(vec![HourlyTable::default()], vec![DailyTable::default()]).unwrap();
        assert!(hourly.is_empty());
        assert!(daily.is_empty());
    }
}
