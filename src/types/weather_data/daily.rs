use chrono::NaiveDate;

/// One observation of the daily shortwave radiation sum for one city.
#[derive(Debug, PartialEq, Clone)]
pub struct DailyRecord {
    pub date: Option<NaiveDate>,              // time, None if unparsable
    pub shortwave_radiation_sum: Option<f64>, // unit reported by the API
    pub city: String,
    pub sum_7d_mean: Option<f64>, // derived, see compute_rolling
}

impl DailyRecord {
    pub fn has_valid_date(&self) -> bool {
        self.date.is_some()
    }
}
