//! tourdates configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use chrono_tz::Tz;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{TourError, TourResult};
use crate::filter::TourFilter;
use crate::ics::{DEFAULT_UID_DOMAIN, ExportSettings};
use crate::tour::{DEFAULT_ARTIST, Tour};
use crate::tour_date::TourDate;

static DEFAULT_EXPORT_DIR: &str = "~/Downloads";
static DEFAULT_DOORS: &str = "21:00";
static DEFAULT_SET_LENGTH: &str = "2h 30m";

const ENV_PREFIX: &str = "TOURDATES";

fn default_artist() -> String {
    DEFAULT_ARTIST.to_string()
}

fn default_doors() -> String {
    DEFAULT_DOORS.to_string()
}

fn default_set_length() -> String {
    DEFAULT_SET_LENGTH.to_string()
}

fn default_uid_domain() -> String {
    DEFAULT_UID_DOMAIN.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Configuration at ~/.config/tourdates/config.toml, overridable with
/// `TOURDATES_*` environment variables.
///
/// Values are kept as written; [`export_settings`](Self::export_settings)
/// and [`tour`](Self::tour) validate them.
#[derive(Debug, Deserialize, Clone)]
pub struct TourConfig {
    #[serde(default = "default_artist")]
    pub artist: String,

    /// IANA zone the doors time is in. Unset means the host's zone.
    pub timezone: Option<String>,

    #[serde(default = "default_doors")]
    pub doors: String,

    #[serde(default = "default_set_length")]
    pub set_length: String,

    #[serde(default = "default_uid_domain")]
    pub uid_domain: String,

    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default)]
    pub default_filter: TourFilter,

    /// Replaces the built-in dataset when present
    pub dates: Option<Vec<TourDate>>,
}

impl Default for TourConfig {
    fn default() -> Self {
        TourConfig {
            artist: default_artist(),
            timezone: None,
            doors: default_doors(),
            set_length: default_set_length(),
            uid_domain: default_uid_domain(),
            export_dir: default_export_dir(),
            default_filter: TourFilter::default(),
            dates: None,
        }
    }
}

impl TourConfig {
    pub fn config_path() -> TourResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TourError::Config("Could not determine config directory".into()))?
            .join("tourdates");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template first
    /// if there is no file yet.
    pub fn load() -> TourResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            if let Err(e) = Self::create_default_config(&config_path) {
                tracing::warn!(error = %e, "could not create default config, using defaults");
            }
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) layered under the environment.
    pub fn load_from(path: &Path) -> TourResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| TourError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TourError::Config(e.to_string()))
    }

    /// Parse TOML text directly, without environment overrides.
    pub fn from_toml_str(content: &str) -> TourResult<Self> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| TourError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TourError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TourResult<()> {
        let contents = format!(
            "\
# tourdates configuration

# Artist shown in calendar entries and export filenames:
# artist = \"{DEFAULT_ARTIST}\"

# Time zone the shows are in (defaults to this machine's zone):
# timezone = \"Europe/London\"

# When the set starts and how long it runs:
# doors = \"{DEFAULT_DOORS}\"
# set_length = \"{DEFAULT_SET_LENGTH}\"

# Where exported .ics files are saved:
# export_dir = \"{DEFAULT_EXPORT_DIR}\"

# Filter used when none is given (all, uk, eu):
# default_filter = \"all\"

# Replace the built-in dates:
# [[dates]]
# date = \"2025-01-18\"
# city = \"London\"
# country = \"UK\"
# venue = \"Studio Night (Soho)\"
# status = \"Tickets\"
# url = \"#contact\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TourError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TourError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The tour described by this config.
    pub fn tour(&self) -> TourResult<Tour> {
        match &self.dates {
            Some(dates) => Tour::new(&self.artist, dates.clone()),
            None => Tour::new(&self.artist, Tour::builtin().dates().to_vec()),
        }
    }

    /// Validated export settings. `host_timezone` is used when no zone is
    /// configured; without either the shows are read as UTC.
    pub fn export_settings(&self, host_timezone: Option<&str>) -> TourResult<ExportSettings> {
        let timezone = match self.timezone.as_deref().or(host_timezone) {
            Some(name) => parse_timezone(name)?,
            None => {
                tracing::warn!("no time zone configured, reading show times as UTC");
                Tz::UTC
            }
        };

        let doors = NaiveTime::parse_from_str(self.doors.trim(), "%H:%M").map_err(|_| {
            TourError::Config(format!("Invalid doors time '{}'. Expected HH:MM", self.doors))
        })?;

        let set_length = humantime::parse_duration(&self.set_length)
            .ok()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .filter(|d| *d > chrono::Duration::zero())
            .ok_or_else(|| {
                TourError::Config(format!(
                    "Invalid set length '{}'. Expected a duration like \"2h 30m\"",
                    self.set_length
                ))
            })?;

        Ok(ExportSettings {
            artist: self.artist.clone(),
            timezone,
            doors,
            set_length,
            uid_domain: self.uid_domain.clone(),
        })
    }

    /// Export directory with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.export_dir.to_string_lossy()).into_owned())
    }
}

fn parse_timezone(name: &str) -> TourResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| TourError::Config(format!("Invalid time zone '{}': {}", name, e)))
}
