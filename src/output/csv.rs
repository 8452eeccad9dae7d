//! CSV export of the tidy tables through Polars.

use crate::output::error::OutputError;
use crate::types::frames::daily_table::DailyTable;
use crate::types::frames::hourly_table::HourlyTable;
use log::debug;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use std::fs::File;
use std::path::Path;

pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes the hourly table to `path` as `timestamp,shortwave_radiation,city`.
pub fn write_hourly_csv(table: &HourlyTable, path: &Path) -> Result<(), OutputError> {
    let df = table
        .to_frame()
        .map_err(|e| OutputError::Frame(path.to_path_buf(), e))?;
    write_frame(df, path)
}

/// Writes the daily table to `path` as `date,shortwave_radiation_sum,city,sum_7d_mean`.
pub fn write_daily_csv(table: &DailyTable, path: &Path) -> Result<(), OutputError> {
    let df = table
        .to_frame()
        .map_err(|e| OutputError::Frame(path.to_path_buf(), e))?;
    write_frame(df, path)
}

// Missing values are written as empty fields.
fn write_frame(mut df: DataFrame, path: &Path) -> Result<(), OutputError> {
    let mut file = File::create(path).map_err(|e| OutputError::FileCreate(path.to_path_buf(), e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_string()))
        .with_date_format(Some(CSV_DATE_FORMAT.to_string()))
        .finish(&mut df)
        .map_err(|e| OutputError::CsvWrite(path.to_path_buf(), e))?;
    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
