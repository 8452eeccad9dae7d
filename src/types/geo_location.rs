//! Geographical types: a bare coordinate pair and the best-match place returned
//! by the Open-Meteo geocoding API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use irradiance::LatLon;
///
/// let montreal = LatLon(45.5088, -73.5878);
/// assert_eq!(montreal.0, 45.5088); // Latitude
/// assert_eq!(montreal.1, -73.5878); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A resolved place, as returned by the geocoding endpoint.
///
/// Produced once per requested city and only used to parameterise the forecast
/// request; it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Place name in English (e.g. "Montréal").
    pub name: String,
    /// ISO 3166-1 alpha-2 country code, if reported.
    #[serde(default)]
    pub country_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone of the place (e.g. "America/Toronto"), if reported.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl GeoLocation {
    pub fn lat_lon(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country_code {
            Some(cc) => write!(
                f,
                "{}, {} ({:.4}, {:.4})",
                self.name, cc, self.latitude, self.longitude
            ),
            None => write!(
                f,
                "{} ({:.4}, {:.4})",
                self.name, self.latitude, self.longitude
            ),
        }
    }
}
