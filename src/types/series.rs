//! Raw, parallel-array series as delivered by the Open-Meteo forecast endpoint.
//!
//! These mirror the API shape (one vector of time strings next to one vector of
//! values) and are only turned into row records by [`crate::build_tidy`].

/// Unit label assumed for hourly radiation when the response does not carry one.
pub const DEFAULT_HOURLY_UNIT: &str = "W/m²";
/// Unit label assumed for the daily radiation sum when the response does not carry one.
pub const DEFAULT_DAILY_UNIT: &str = "Wh/m²";

/// Hourly shortwave radiation, index-aligned with `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub shortwave_radiation: Vec<Option<f64>>,
    pub unit: String,
}

/// Daily shortwave radiation sum, index-aligned with `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub shortwave_radiation_sum: Vec<Option<f64>>,
    pub unit: String,
}

/// Both series returned by a single forecast request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawWeather {
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

impl Default for HourlySeries {
    fn default() -> Self {
        Self {
            time: Vec::new(),
            shortwave_radiation: Vec::new(),
            unit: DEFAULT_HOURLY_UNIT.to_string(),
        }
    }
}

impl Default for DailySeries {
    fn default() -> Self {
        Self {
            time: Vec::new(),
            shortwave_radiation_sum: Vec::new(),
            unit: DEFAULT_DAILY_UNIT.to_string(),
        }
    }
}

impl HourlySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
