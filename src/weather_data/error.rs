use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to build HTTP client for the forecast API")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse forecast response from {0}")]
    JsonParse(String, #[source] serde_json::Error),

    #[error("past_days must be at most {max}, got {requested}")]
    PastDaysOutOfRange { requested: u32, max: u32 },
}
