//! Sequential orchestration of a full run: resolve, fetch, tidy, merge, roll, write.

use crate::error::IrradianceError;
use crate::irradiance::Irradiance;
use crate::output::charts::{plot_lines, plot_weekly_bars};
use crate::output::csv::{write_daily_csv, write_hourly_csv};
use crate::output::error::OutputError;
use crate::settings::Settings;
use crate::transform::merge::merge_all;
use crate::transform::rolling::compute_rolling;
use crate::transform::tidy::build_tidy;
use crate::types::frames::daily_table::DailyTable;
use crate::types::frames::hourly_table::HourlyTable;
use crate::types::geo_location::GeoLocation;
use crate::utils::ensure_dir_exists;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use tokio::task;

pub const HOURLY_CSV: &str = "hourly_shortwave_radiation.csv";
pub const DAILY_CSV: &str = "daily_shortwave_radiation_sum.csv";
pub const LINES_CHART: &str = "daily_radiation_sum_lines.png";
pub const WEEKLY_CHART: &str = "weekly_best_worst.png";

/// Locations of every file a run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub data_dir: PathBuf,
    pub charts_dir: PathBuf,
    pub hourly_csv: PathBuf,
    pub daily_csv: PathBuf,
    pub lines_chart: PathBuf,
    pub weekly_chart: PathBuf,
}

impl OutputPaths {
    pub fn new(settings: &Settings) -> Self {
        let data_dir = settings.data_dir();
        let charts_dir = settings.charts_dir();
        Self {
            hourly_csv: data_dir.join(HOURLY_CSV),
            daily_csv: data_dir.join(DAILY_CSV),
            lines_chart: charts_dir.join(LINES_CHART),
            weekly_chart: charts_dir.join(WEEKLY_CHART),
            data_dir,
            charts_dir,
        }
    }
}

/// The tidy tables of one resolved city.
#[derive(Debug, Clone)]
pub struct CityFrames {
    pub city: String,
    pub location: GeoLocation,
    pub hourly: HourlyTable,
    pub daily: DailyTable,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub paths: OutputPaths,
    pub cities: Vec<String>,
    pub skipped: Vec<String>,
    pub hourly_rows: usize,
    pub daily_rows: usize,
}

/// Resolves and downloads every configured city, one after the other.
///
/// Cities the geocoder cannot find are skipped with a warning. Any HTTP or
/// network error aborts the whole collection.
pub async fn collect_cities(
    client: &Irradiance,
    settings: &Settings,
) -> Result<Vec<CityFrames>, IrradianceError> {
    let mut collected = Vec::with_capacity(settings.cities.len());

    for city in &settings.cities {
        debug!("Geocoding: {}", city);
        let Some(location) = client.geocode(city).call().await? else {
            warn!("Could not geocode: {}", city);
            continue;
        };

        let timezone = settings.resolve_timezone(location.timezone.as_deref());
        debug!(
            "{} -> ({:.4}, {:.4}) tz={}",
            city, location.latitude, location.longitude, timezone
        );

        debug!("Fetching Open-Meteo for {}", city);
        let raw = client
            .weather(location.lat_lon())
            .past_days(settings.past_days)
            .timezone(&timezone)
            .call()
            .await?;
        debug!(
            "Received hourly={} daily={}",
            raw.hourly.len(),
            raw.daily.len()
        );

        let (hourly, daily) = build_tidy(city, &raw.hourly, &raw.daily);
        collected.push(CityFrames {
            city: city.clone(),
            location,
            hourly,
            daily,
        });
    }

    Ok(collected)
}

/// Merges the per-city tables and computes the rolling daily mean.
pub fn aggregate(frames: Vec<CityFrames>) -> Result<(HourlyTable, DailyTable), IrradianceError> {
    let (hourly_tables, daily_tables): (Vec<_>, Vec<_>) =
        frames.into_iter().map(|f| (f.hourly, f.daily)).unzip();
    let (hourly, daily) = merge_all(hourly_tables, daily_tables)?;
    debug!("Computing rolling means on {} daily rows", daily.len());
    Ok(compute_rolling(hourly, daily))
}

/// Writes both tables as CSV on the blocking thread pool.
pub async fn write_csvs(
    hourly: &HourlyTable,
    daily: &DailyTable,
    paths: &OutputPaths,
) -> Result<(), IrradianceError> {
    let (hourly, daily, paths) = (hourly.clone(), daily.clone(), paths.clone());
    task::spawn_blocking(move || {
        write_hourly_csv(&hourly, &paths.hourly_csv)?;
        write_daily_csv(&daily, &paths.daily_csv)?;
        Ok::<(), OutputError>(())
    })
    .await??;
    Ok(())
}

/// Renders both charts on the blocking thread pool.
pub async fn render_charts(daily: &DailyTable, paths: &OutputPaths) -> Result<(), IrradianceError> {
    let (daily, paths) = (daily.clone(), paths.clone());
    task::spawn_blocking(move || {
        plot_lines(&daily, &paths.lines_chart)?;
        plot_weekly_bars(&daily, &paths.weekly_chart)?;
        Ok::<(), OutputError>(())
    })
    .await??;
    Ok(())
}

async fn create_dir(path: &Path) -> Result<(), IrradianceError> {
    ensure_dir_exists(path)
        .await
        .map_err(|e| IrradianceError::OutputDirCreation(path.to_path_buf(), e))
}

/// Runs the whole pipeline.
///
/// Output directories are created first. If no city can be resolved the run
/// ends with [`IrradianceError::EmptyResult`] and no data file is written.
pub async fn run(client: &Irradiance, settings: &Settings) -> Result<RunSummary, IrradianceError> {
    let paths = OutputPaths::new(settings);
    create_dir(&paths.data_dir).await?;
    create_dir(&paths.charts_dir).await?;

    let frames = collect_cities(client, settings).await?;
    if frames.is_empty() {
        return Err(IrradianceError::EmptyResult {
            cities: settings.cities.clone(),
        });
    }

    let cities: Vec<String> = frames.iter().map(|f| f.city.clone()).collect();
    let skipped: Vec<String> = settings
        .cities
        .iter()
        .filter(|c| !cities.contains(c))
        .cloned()
        .collect();

    let (hourly, daily) = aggregate(frames)?;
    write_csvs(&hourly, &daily, &paths).await?;
    debug!(
        "Saved CSVs: {} , {}",
        paths.hourly_csv.display(),
        paths.daily_csv.display()
    );

    debug!("Creating plots");
    render_charts(&daily, &paths).await?;

    Ok(RunSummary {
        paths,
        cities,
        skipped,
        hourly_rows: hourly.len(),
        daily_rows: daily.len(),
    })
}
