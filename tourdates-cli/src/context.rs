//! Everything a command needs, loaded once from the config.

use anyhow::{Context as _, Result};
use tourdates_core::ics::{EventFormatter, ExportSettings};
use tourdates_core::tour_config::TourConfig;
use tourdates_core::{Tour, TourFilter};

pub struct Context {
    pub config: TourConfig,
    pub tour: Tour,
    pub settings: ExportSettings,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = TourConfig::load().context("Could not load configuration")?;
        Self::from_config(config, host_timezone().as_deref())
    }

    pub fn from_config(config: TourConfig, host_timezone: Option<&str>) -> Result<Self> {
        let tour = config.tour().context("Invalid tour dates in configuration")?;
        let settings = config.export_settings(host_timezone)?;

        tracing::debug!(
            artist = %tour.artist(),
            dates = tour.dates().len(),
            timezone = %settings.timezone,
            "loaded tour"
        );

        Ok(Context {
            config,
            tour,
            settings,
        })
    }

    /// The filter given on the command line, or the configured default.
    pub fn resolve_filter(&self, key: Option<&str>) -> Result<TourFilter> {
        match key {
            Some(key) => Ok(key.parse()?),
            None => Ok(self.config.default_filter),
        }
    }

    pub fn formatter(&self) -> EventFormatter {
        EventFormatter::new(self.settings.clone())
    }
}

/// The machine's IANA zone, if it can be determined.
pub fn host_timezone() -> Option<String> {
    match iana_time_zone::get_timezone() {
        Ok(tz) => Some(tz),
        Err(e) => {
            tracing::warn!(error = %e, "could not determine local time zone");
            None
        }
    }
}
