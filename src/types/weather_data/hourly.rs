use chrono::NaiveDateTime;

/// One observation of hourly shortwave radiation for one city.
///
/// `timestamp` is `None` when the source time string could not be parsed; such
/// rows are dropped by [`crate::compute_rolling`].
#[derive(Debug, PartialEq, Clone)]
pub struct HourlyRecord {
    pub timestamp: Option<NaiveDateTime>, // time
    pub shortwave_radiation: Option<f64>, // W/m²
    pub city: String,
}

impl HourlyRecord {
    pub fn has_valid_timestamp(&self) -> bool {
        self.timestamp.is_some()
    }
}
