use crate::geocoding::error::GeocodeError;
use crate::types::geo_location::GeoLocation;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const GEOCODING_TIMEOUT: Duration = Duration::from_secs(20);
const SEARCH_PATH: &str = "/v1/search";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Absent when nothing matched.
    #[serde(default)]
    results: Vec<GeoLocation>,
}

/// Resolves free-text place names through the Open-Meteo geocoding API.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    search_url: String,
}

impl Geocoder {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GeocodeError::ClientBuild)?;
        Ok(Self {
            client,
            search_url: format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH),
        })
    }

    /// Returns up to `count` matches for `query`, best match first.
    pub async fn search(&self, query: &str, count: u32) -> Result<Vec<GeoLocation>, GeocodeError> {
        let count = count.to_string();
        let request = self
            .client
            .get(&self.search_url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ])
            .build()
            .map_err(|e| GeocodeError::NetworkRequest(self.search_url.clone(), e))?;
        let url = request.url().to_string();
        debug!("Geocoding request: {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    GeocodeError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    GeocodeError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;
        let parsed: SearchResponse =
            serde_json::from_slice(&body).map_err(|e| GeocodeError::JsonParse(url, e))?;
        Ok(parsed.results)
    }

    /// Resolves `query` to its single best match, or `None` if nothing matched.
    pub async fn resolve(
        &self,
        query: &str,
        count: u32,
    ) -> Result<Option<GeoLocation>, GeocodeError> {
        let best = self.search(query, count).await?.into_iter().next();
        match &best {
            Some(location) => debug!("Geocoded '{}' to {}", query, location),
            None => debug!("No geocoding match for '{}'", query),
        }
        Ok(best)
    }
}
