use crate::geocoding::error::GeocodeError;
use crate::output::error::OutputError;
use crate::transform::error::TransformError;
use crate::weather_data::error::WeatherDataError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IrradianceError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("No data fetched: none of the requested cities could be geocoded ({})", .cities.join(", "))]
    EmptyResult { cities: Vec<String> },

    #[error("Failed to create output directory '{0}'")]
    OutputDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
