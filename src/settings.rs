use crate::irradiance::DEFAULT_PAST_DAYS;
use bon::bon;
use std::path::PathBuf;

/// Timezone value that defers to the geocoded timezone of each city.
pub const AUTO_TIMEZONE: &str = "auto";
/// Fallback when `auto` is requested but geocoding returned no timezone.
pub const FALLBACK_TIMEZONE: &str = "UTC";

pub const DATA_DIR: &str = "data";
pub const CHARTS_DIR: &str = "charts";

/// Run configuration of the irradiance pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub cities: Vec<String>,
    pub past_days: u32,
    pub timezone: String,
    pub outdir: PathBuf,
}

#[bon]
impl Settings {
    /// Creates the settings for a run over `cities`.
    ///
    /// * `.past_days(u32)`: Optional. Defaults to `30`.
    /// * `.timezone(String)`: Optional. An IANA name or `"auto"`. Defaults to `"auto"`.
    /// * `.outdir(PathBuf)`: Optional. Root of the `data/` and `charts/` folders. Defaults to `.`.
    #[builder]
    pub fn new(
        #[builder(start_fn)] cities: Vec<String>,
        past_days: Option<u32>,
        #[builder(into)] timezone: Option<String>,
        #[builder(into)] outdir: Option<PathBuf>,
    ) -> Self {
        Self {
            cities,
            past_days: past_days.unwrap_or(DEFAULT_PAST_DAYS),
            timezone: timezone.unwrap_or_else(|| AUTO_TIMEZONE.to_string()),
            outdir: outdir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.outdir.join(DATA_DIR)
    }

    pub fn charts_dir(&self) -> PathBuf {
        self.outdir.join(CHARTS_DIR)
    }

    /// The timezone to request for a city whose geocoded zone is `geocoded`.
    ///
    /// `auto` (any case) resolves to `geocoded`, or `UTC` when that is absent.
    /// Any other value is used as given.
    pub fn resolve_timezone(&self, geocoded: Option<&str>) -> String {
        if self.timezone.eq_ignore_ascii_case(AUTO_TIMEZONE) {
            geocoded.unwrap_or(FALLBACK_TIMEZONE).to_string()
        } else {
            self.timezone.clone()
        }
    }
}
