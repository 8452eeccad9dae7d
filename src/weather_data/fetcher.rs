use crate::types::geo_location::LatLon;
use crate::types::series::{
    DailySeries, HourlySeries, RawWeather, DEFAULT_DAILY_UNIT, DEFAULT_HOURLY_UNIT,
};
use crate::weather_data::error::WeatherDataError;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
pub const FORECAST_TIMEOUT: Duration = Duration::from_secs(30);
/// Largest `past_days` the forecast endpoint accepts.
pub const MAX_PAST_DAYS: u32 = 92;
const FORECAST_PATH: &str = "/v1/forecast";
const HOURLY_VARIABLE: &str = "shortwave_radiation";
const DAILY_VARIABLE: &str = "shortwave_radiation_sum";

// Every field is optional in practice; missing blocks become empty series.
#[derive(Debug, Default, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    hourly: HourlyBlock,
    #[serde(default)]
    hourly_units: HourlyUnits,
    #[serde(default)]
    daily: DailyBlock,
    #[serde(default)]
    daily_units: DailyUnits,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    shortwave_radiation: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyUnits {
    shortwave_radiation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    shortwave_radiation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyUnits {
    shortwave_radiation_sum: Option<String>,
}

impl From<ForecastResponse> for RawWeather {
    fn from(response: ForecastResponse) -> Self {
        RawWeather {
            hourly: HourlySeries {
                time: response.hourly.time,
                shortwave_radiation: response.hourly.shortwave_radiation,
                unit: response
                    .hourly_units
                    .shortwave_radiation
                    .unwrap_or_else(|| DEFAULT_HOURLY_UNIT.to_string()),
            },
            daily: DailySeries {
                time: response.daily.time,
                shortwave_radiation_sum: response.daily.shortwave_radiation_sum,
                unit: response
                    .daily_units
                    .shortwave_radiation_sum
                    .unwrap_or_else(|| DEFAULT_DAILY_UNIT.to_string()),
            },
        }
    }
}

/// Downloads hourly and daily shortwave radiation from the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: Client,
    forecast_url: String,
}

impl WeatherFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WeatherDataError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherDataError::ClientBuild)?;
        Ok(Self {
            client,
            forecast_url: format!("{}{}", base_url.trim_end_matches('/'), FORECAST_PATH),
        })
    }

    /// Fetches the last `past_days` days plus today for `location`.
    ///
    /// Times in the response are local to `timezone` (an IANA name, or `auto` to let
    /// the API pick the zone of the coordinates).
    pub async fn fetch(
        &self,
        location: LatLon,
        past_days: u32,
        timezone: &str,
    ) -> Result<RawWeather, WeatherDataError> {
        if past_days > MAX_PAST_DAYS {
            return Err(WeatherDataError::PastDaysOutOfRange {
                requested: past_days,
                max: MAX_PAST_DAYS,
            });
        }

        let latitude = location.0.to_string();
        let longitude = location.1.to_string();
        let past_days = past_days.to_string();
        let request = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("hourly", HOURLY_VARIABLE),
                ("daily", DAILY_VARIABLE),
                ("past_days", past_days.as_str()),
                ("forecast_days", "1"),
                ("timezone", timezone),
            ])
            .build()
            .map_err(|e| WeatherDataError::NetworkRequest(self.forecast_url.clone(), e))?;
        let url = request.url().to_string();
        debug!("Downloading forecast from {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    WeatherDataError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    WeatherDataError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherDataError::NetworkRequest(url.clone(), e))?;
        let parsed: ForecastResponse =
            serde_json::from_slice(&body).map_err(|e| WeatherDataError::JsonParse(url, e))?;

        let raw = RawWeather::from(parsed);
        debug!(
            "Received hourly={} daily={} entries",
            raw.hourly.len(),
            raw.daily.len()
        );
        Ok(raw)
    }
}
