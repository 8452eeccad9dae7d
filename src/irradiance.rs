//! This module provides the main entry point for talking to Open-Meteo.
//! It resolves place names to coordinates and downloads the raw irradiance
//! series for a coordinate pair.

use crate::error::IrradianceError;
use crate::geocoding::geocoder::{Geocoder, DEFAULT_GEOCODING_URL, GEOCODING_TIMEOUT};
use crate::types::geo_location::{GeoLocation, LatLon};
use crate::types::series::RawWeather;
use crate::weather_data::fetcher::{WeatherFetcher, DEFAULT_FORECAST_URL, FORECAST_TIMEOUT};
use bon::bon;
use std::time::Duration;

/// Default number of past days requested from the forecast endpoint.
pub const DEFAULT_PAST_DAYS: u32 = 30;
/// Timezone used for a forecast request when none is given.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// The client for the Open-Meteo geocoding and forecast APIs.
///
/// Both underlying HTTP clients carry a fixed request timeout (20 s for geocoding,
/// 30 s for forecasts by default). Requests are never retried.
///
/// # Examples
///
/// ```no_run
/// # use irradiance::{Irradiance, IrradianceError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), IrradianceError> {
/// let client = Irradiance::builder().build()?;
///
/// if let Some(place) = client.geocode("Teresina,BR").call().await? {
///     let raw = client
///         .weather(place.lat_lon())
///         .past_days(14)
///         .timezone("America/Fortaleza")
///         .call()
///         .await?;
///     println!("{} hourly values for {}", raw.hourly.len(), place);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Irradiance {
    geocoder: Geocoder,
    fetcher: WeatherFetcher,
}

#[bon]
impl Irradiance {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `.geocoding_url(String)`: Optional. Base URL of the geocoding API. Defaults to
    ///   [`DEFAULT_GEOCODING_URL`].
    /// * `.forecast_url(String)`: Optional. Base URL of the forecast API. Defaults to
    ///   [`DEFAULT_FORECAST_URL`].
    /// * `.geocoding_timeout(Duration)`: Optional. Defaults to 20 seconds.
    /// * `.forecast_timeout(Duration)`: Optional. Defaults to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`IrradianceError::Geocode`] or [`IrradianceError::WeatherData`] if an
    /// HTTP client cannot be constructed (e.g. no TLS backend available).
    #[builder]
    pub fn new(
        #[builder(into)] geocoding_url: Option<String>,
        #[builder(into)] forecast_url: Option<String>,
        geocoding_timeout: Option<Duration>,
        forecast_timeout: Option<Duration>,
    ) -> Result<Self, IrradianceError> {
        let geocoder = Geocoder::new(
            geocoding_url.as_deref().unwrap_or(DEFAULT_GEOCODING_URL),
            geocoding_timeout.unwrap_or(GEOCODING_TIMEOUT),
        )?;
        let fetcher = WeatherFetcher::new(
            forecast_url.as_deref().unwrap_or(DEFAULT_FORECAST_URL),
            forecast_timeout.unwrap_or(FORECAST_TIMEOUT),
        )?;
        Ok(Self { geocoder, fetcher })
    }

    /// Resolves a free-text place name to its best match.
    ///
    /// # Arguments
    ///
    /// * `query` - The place name, e.g. `"Montreal,CA"`.
    /// * `.count(u32)`: Optional. Number of candidates requested from the API. Defaults to `1`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the API reports no match.
    ///
    /// # Errors
    ///
    /// Returns [`IrradianceError::Geocode`] on network failures, non-success HTTP
    /// status codes or an unreadable response body.
    #[builder]
    pub async fn geocode(
        &self,
        #[builder(start_fn)] query: &str,
        count: Option<u32>,
    ) -> Result<Option<GeoLocation>, IrradianceError> {
        Ok(self.geocoder.resolve(query, count.unwrap_or(1)).await?)
    }

    /// Downloads hourly and daily shortwave radiation for a coordinate pair.
    ///
    /// # Arguments
    ///
    /// * `location` - The [`LatLon`] to fetch.
    /// * `.past_days(u32)`: Optional. Days of history before today (0..=92). Defaults to `30`.
    /// * `.timezone(&str)`: Optional. IANA timezone for the returned local times. Defaults to `"UTC"`.
    ///
    /// # Errors
    ///
    /// Returns [`IrradianceError::WeatherData`] on network failures, non-success HTTP
    /// status codes, an unreadable response body or an out-of-range `past_days`.
    #[builder]
    pub async fn weather(
        &self,
        #[builder(start_fn)] location: LatLon,
        past_days: Option<u32>,
        timezone: Option<&str>,
    ) -> Result<RawWeather, IrradianceError> {
        Ok(self
            .fetcher
            .fetch(
                location,
                past_days.unwrap_or(DEFAULT_PAST_DAYS),
                timezone.unwrap_or(DEFAULT_TIMEZONE),
            )
            .await?)
    }
}
