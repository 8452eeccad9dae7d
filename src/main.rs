use anyhow::Context;
use clap::Parser;
use irradiance::{
    Irradiance, IrradianceError, RunSummary, Settings, DEFAULT_FORECAST_URL,
    DEFAULT_GEOCODING_URL,
};
use log::{debug, error};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when none of the requested cities could be resolved.
const EXIT_NO_DATA: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "irradiance",
    version,
    about = "Solar irradiance dashboard for a list of cities (Open-Meteo)"
)]
struct Args {
    /// City names, e.g. 'Montreal,CA' 'Teresina,BR'
    #[arg(long, num_args = 1.., required = true)]
    cities: Vec<String>,

    /// How many past days to fetch (0 to 92)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(0..=92))]
    days: u32,

    /// IANA timezone (e.g. America/Toronto) or 'auto' for each city's own zone
    #[arg(long, default_value = "auto")]
    timezone: String,

    /// Output base directory; data/ and charts/ are created below it
    #[arg(long, default_value = ".")]
    outdir: PathBuf,

    /// Print progress
    #[arg(long)]
    verbose: bool,

    #[arg(long, env = "IRRADIANCE_GEOCODING_URL", default_value = DEFAULT_GEOCODING_URL, hide = true)]
    geocoding_url: String,

    #[arg(long, env = "IRRADIANCE_FORECAST_URL", default_value = DEFAULT_FORECAST_URL, hide = true)]
    forecast_url: String,
}

/// Progress is logged at `debug`; only `--verbose` lets it through.
/// Warnings (e.g. skipped cities) and errors always print.
fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,irradiance=debug"
    } else {
        "info"
    }
}

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(log_filter(verbose));
    env_logger::init_from_env(env);
}

async fn run(args: Args) -> anyhow::Result<RunSummary> {
    let client = Irradiance::builder()
        .geocoding_url(args.geocoding_url)
        .forecast_url(args.forecast_url)
        .build()
        .context("Failed to set up the Open-Meteo client")?;

    let settings = Settings::builder(args.cities)
        .past_days(args.days)
        .timezone(args.timezone)
        .outdir(args.outdir)
        .build();

    Ok(irradiance::run(&client, &settings).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("{:?}", args);

    match run(args).await {
        Ok(summary) => {
            for city in &summary.skipped {
                debug!("Skipped: {}", city);
            }
            println!(
                "Done: CSVs in {} ; charts in {}",
                summary.paths.data_dir.display(),
                summary.paths.charts_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<IrradianceError>() {
            Some(IrradianceError::EmptyResult { .. }) => {
                eprintln!("{}. Exiting.", e);
                ExitCode::from(EXIT_NO_DATA)
            }
            _ => {
                error!("{:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Record};

    fn passes(verbose: bool, target: &str, level: Level) -> bool {
        let logger = env_logger::Builder::new()
            .parse_filters(log_filter(verbose))
            .build();
        logger.matches(&Record::builder().target(target).level(level).build())
    }

    #[test]
    fn test_progress_only_logged_when_verbose() {
        assert!(!passes(false, "irradiance::pipeline", Level::Debug));
        assert!(passes(true, "irradiance::pipeline", Level::Debug));

        // Skipped-city warnings print either way; dependencies stay quiet.
        assert!(passes(false, "irradiance::pipeline", Level::Warn));
        assert!(!passes(true, "reqwest::connect", Level::Debug));
    }

    #[test]
    fn test_cli_defaults_and_days_range() {
        let args = Args::try_parse_from(["irradiance", "--cities", "Montreal,CA", "Teresina,BR"])
            .unwrap();
        assert_eq!(args.cities, vec!["Montreal,CA", "Teresina,BR"]);
        assert_eq!(args.days, 30);
        assert_eq!(args.timezone, "auto");
        assert!(!args.verbose);

        assert!(Args::try_parse_from(["irradiance", "--cities", "X", "--days", "93"]).is_err());
        assert!(Args::try_parse_from(["irradiance"]).is_err());
    }
}
