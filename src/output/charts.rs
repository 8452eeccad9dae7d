//! PNG charts of the final daily table.

use crate::output::error::OutputError;
use crate::output::weekly::{best_and_worst_weeks, WeeklyExtremes};
use crate::types::frames::daily_table::DailyTable;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use log::{debug, warn};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

pub const CHART_SIZE: (u32, u32) = (1200, 600);

const BEST_COLOR: RGBColor = RGBColor(76, 175, 80);
const WORST_COLOR: RGBColor = RGBColor(255, 152, 0);

type ChartResult = Result<(), Box<dyn Error>>;

/// One line per city: `(city, [(date, daily sum)])`, dates ascending.
pub type CitySeries = Vec<(String, Vec<(NaiveDate, f64)>)>;

/// Collects the plottable points of every city. Rows missing a date or a sum are skipped.
pub fn line_series(daily: &DailyTable) -> CitySeries {
    daily
        .cities()
        .into_iter()
        .map(|city| {
            let mut points: Vec<(NaiveDate, f64)> = daily
                .rows_for_city(city)
                .filter_map(|r| Some((r.date?, r.shortwave_radiation_sum?)))
                .collect();
            points.sort_by_key(|(date, _)| *date);
            (city.to_string(), points)
        })
        .collect()
}

/// Renders the daily radiation sum of every city as a line chart.
pub fn plot_lines(daily: &DailyTable, path: &Path) -> Result<(), OutputError> {
    let series = line_series(daily);
    render_with_fallback(path, |labelled| draw_lines(&series, path, labelled))
}

/// Renders, per city, the mean daily sum of its best and worst week as bars.
pub fn plot_weekly_bars(daily: &DailyTable, path: &Path) -> Result<(), OutputError> {
    let extremes = best_and_worst_weeks(daily);
    render_with_fallback(path, |labelled| draw_weekly_bars(&extremes, path, labelled))
}

/// Draws with captions and labels first. Text needs a system font, so when that
/// attempt fails the chart is drawn again without any text.
fn render_with_fallback(path: &Path, draw: impl Fn(bool) -> ChartResult) -> Result<(), OutputError> {
    if let Err(e) = draw(true) {
        warn!(
            "Could not draw labels on {} ({}); saving it without text",
            path.display(),
            e
        );
        draw(false).map_err(|e| chart_error(path, e))?;
    }
    debug!("Saved chart {}", path.display());
    Ok(())
}

fn chart_error(path: &Path, e: Box<dyn Error>) -> OutputError {
    OutputError::Chart {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Upper bound of the value axis with 10% headroom.
fn value_ceiling(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn date_bounds(series: &CitySeries) -> (NaiveDate, NaiveDate) {
    let dates = series.iter().flat_map(|(_, points)| points.iter().map(|(d, _)| *d));
    let first = dates.clone().min();
    let last = dates.max();
    match (first, last) {
        (Some(first), Some(last)) if first < last => (first, last),
        (Some(first), _) => (first, first + Duration::days(1)),
        _ => {
            let epoch = NaiveDate::default();
            (epoch, epoch + Duration::days(1))
        }
    }
}

fn draw_lines(series: &CitySeries, path: &Path, labelled: bool) -> ChartResult {
    let (first, last) = date_bounds(series);
    let y_max = value_ceiling(series.iter().flat_map(|(_, p)| p.iter().map(|(_, v)| *v)));
    let date_label = |dt: &DateTime<Utc>| dt.format("%Y-%m-%d").to_string();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15).x_label_area_size(40).y_label_area_size(70);
    if labelled {
        builder.caption("Daily shortwave radiation sum", ("sans-serif", 24));
    }
    let mut chart =
        builder.build_cartesian_2d(at_midnight(first)..at_midnight(last), 0.0..y_max)?;

    let mut mesh = chart.configure_mesh();
    if labelled {
        mesh.x_desc("Date")
            .y_desc("shortwave_radiation_sum")
            .x_labels(10)
            .x_label_formatter(&date_label);
    } else {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw()?;

    for (idx, (city, points)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|(date, value)| (at_midnight(*date), *value)),
                color.stroke_width(2),
            ))?
            .label(city.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if labelled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn bar_labels(extremes: &[WeeklyExtremes]) -> Vec<String> {
    extremes
        .iter()
        .flat_map(|e| {
            [
                format!("{} best ({})", e.city, e.best.week_start.format("%m-%d")),
                format!("{} worst ({})", e.city, e.worst.week_start.format("%m-%d")),
            ]
        })
        .collect()
}

fn draw_weekly_bars(extremes: &[WeeklyExtremes], path: &Path, labelled: bool) -> ChartResult {
    let labels = bar_labels(extremes);
    let slots = labels.len().max(1) as i32;
    let y_max = value_ceiling(
        extremes
            .iter()
            .flat_map(|e| [e.best.mean_daily_sum, e.worst.mean_daily_sum]),
    );
    let slot_label = |slot: &SegmentValue<i32>| match slot {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15).x_label_area_size(50).y_label_area_size(70);
    if labelled {
        builder.caption("Best and worst week per city", ("sans-serif", 24));
    }
    let mut chart = builder.build_cartesian_2d((0..slots).into_segmented(), 0.0..y_max)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh();
    if labelled {
        mesh.x_labels(labels.len().max(1))
            .y_desc("Mean daily shortwave_radiation_sum")
            .x_label_formatter(&slot_label);
    } else {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw()?;

    let bars = extremes.iter().enumerate().flat_map(|(idx, e)| {
        let slot = idx as i32 * 2;
        [
            (slot, e.best.mean_daily_sum, BEST_COLOR),
            (slot + 1, e.worst.mean_daily_sum, WORST_COLOR),
        ]
    });
    chart.draw_series(bars.map(|(slot, value, color)| {
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(slot), 0.0),
                (SegmentValue::Exact(slot + 1), value),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    Ok(())
}
