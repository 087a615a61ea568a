//! Global listings configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{ListingsError, ListingsResult};
use crate::source::FixedLocation;

static DEFAULT_EVENTS_FEED: &str = "~/listings/events.json";
static DEFAULT_BURGERS_FEED: &str = "~/listings/burgers.json";
static DEFAULT_FAVORITES_FILE: &str = "~/listings/favorites.json";
static DEFAULT_CACHE_TTL: &str = "1day";
static DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_RADIUS_KM: f64 = 25.0;

fn default_events_feed() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_FEED)
}

fn default_burgers_feed() -> PathBuf {
    PathBuf::from(DEFAULT_BURGERS_FEED)
}

fn default_favorites_file() -> PathBuf {
    PathBuf::from(DEFAULT_FAVORITES_FILE)
}

fn default_cache_ttl() -> String {
    DEFAULT_CACHE_TTL.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}

/// Configuration at ~/.config/listings/config.toml, overridable with
/// `LISTINGS_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsConfig {
    #[serde(default = "default_events_feed")]
    pub events_feed: PathBuf,

    #[serde(default = "default_burgers_feed")]
    pub burgers_feed: PathBuf,

    #[serde(default = "default_favorites_file")]
    pub favorites_file: PathBuf,

    /// Defaults to the platform cache directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// How long a cached feed may be served when the feed is unavailable.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: String,

    /// IANA timezone that decides which calendar day an instant falls on.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        ListingsConfig {
            events_feed: default_events_feed(),
            burgers_feed: default_burgers_feed(),
            favorites_file: default_favorites_file(),
            cache_dir: None,
            cache_ttl: default_cache_ttl(),
            timezone: default_timezone(),
            latitude: None,
            longitude: None,
            default_radius_km: default_radius_km(),
        }
    }
}

impl ListingsConfig {
    pub fn config_path() -> ListingsResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ListingsError::Config("Could not determine config directory".into()))?
            .join("listings");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, creating a commented default file on first run.
    pub fn load() -> ListingsResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::build(&config_path, true)
    }

    /// Load from an explicit file, ignoring the environment.
    pub fn load_from(path: &Path) -> ListingsResult<Self> {
        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> ListingsResult<Self> {
        let mut builder = Config::builder().add_source(File::from(path.to_path_buf()).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix("LISTINGS").try_parsing(true));
        }

        builder
            .build()
            .map_err(|e| ListingsError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ListingsError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ListingsResult<()> {
        let contents = format!(
            "\
# listings configuration

# Feed files:
# events_feed = \"{}\"
# burgers_feed = \"{}\"

# Where favorited ids are kept:
# favorites_file = \"{}\"

# Serve the last good feed for this long when a feed can't be read:
# cache_ttl = \"{}\"

# Timezone used to decide which day an event falls on:
# timezone = \"America/Boise\"

# Your location, for distance filters:
# latitude = 43.6150
# longitude = -116.2023
# default_radius_km = {}
",
            DEFAULT_EVENTS_FEED,
            DEFAULT_BURGERS_FEED,
            DEFAULT_FAVORITES_FILE,
            DEFAULT_CACHE_TTL,
            DEFAULT_RADIUS_KM
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ListingsError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ListingsError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn events_feed_path(&self) -> PathBuf {
        expand(&self.events_feed)
    }

    pub fn burgers_feed_path(&self) -> PathBuf {
        expand(&self.burgers_feed)
    }

    pub fn favorites_path(&self) -> PathBuf {
        expand(&self.favorites_file)
    }

    pub fn cache_path(&self) -> ListingsResult<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(expand(dir)),
            None => dirs::cache_dir()
                .map(|d| d.join("listings"))
                .ok_or_else(|| ListingsError::Config("Could not determine cache directory".into())),
        }
    }

    pub fn cache_ttl(&self) -> ListingsResult<Duration> {
        humantime::parse_duration(&self.cache_ttl)
            .map_err(|e| ListingsError::Config(format!("Invalid cache_ttl '{}': {}", self.cache_ttl, e)))
    }

    pub fn timezone(&self) -> ListingsResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ListingsError::InvalidTimezone(self.timezone.clone()))
    }

    /// Configured device location. Unknown unless both halves are set.
    pub fn location(&self) -> FixedLocation {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => FixedLocation::at(lat, lon),
            _ => FixedLocation::unknown(),
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
