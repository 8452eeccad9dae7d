mod error;
mod geocoding;
mod irradiance;
mod output;
mod pipeline;
mod settings;
mod transform;
mod types;
mod utils;
mod weather_data;

pub use error::IrradianceError;
pub use irradiance::*;
pub use pipeline::*;
pub use settings::*;

pub use geocoding::geocoder::*;
pub use weather_data::fetcher::*;

pub use transform::merge::merge_all;
pub use transform::rolling::{compute_rolling, rolling_mean, MIN_PERIODS, WINDOW};
pub use transform::tidy::build_tidy;

pub use output::charts::{line_series, plot_lines, plot_weekly_bars, CitySeries, CHART_SIZE};
pub use output::csv::{write_daily_csv, write_hourly_csv, CSV_DATETIME_FORMAT, CSV_DATE_FORMAT};
pub use output::weekly::*;

pub use types::frames::daily_table::DailyTable;
pub use types::frames::hourly_table::HourlyTable;
pub use types::geo_location::{GeoLocation, LatLon};
pub use types::series::*;
pub use types::weather_data::daily::DailyRecord;
pub use types::weather_data::hourly::HourlyRecord;

pub use geocoding::error::GeocodeError;
pub use output::error::OutputError;
pub use transform::error::TransformError;
pub use weather_data::error::WeatherDataError;
