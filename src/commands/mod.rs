pub mod burgers;
pub mod events;
pub mod favorite;
pub mod options;

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono_tz::Tz;
use listings_core::EvaluationContext;
use listings_core::config::ListingsConfig;
use listings_core::feed::{self, FeedKind, Listings};
use listings_core::source::{CachedListingSource, FileFavorites, FileListingSource, FixedLocation};
use tracing::debug;

/// Configuration and collaborators shared by every command.
pub struct Session {
    pub config: ListingsConfig,
    pub tz: Tz,
    pub location: FixedLocation,
    pub favorites: FileFavorites,
}

impl Session {
    pub fn load() -> Result<Self> {
        let config = ListingsConfig::load().context("Failed to load configuration")?;
        let tz = config.timezone()?;
        let location = config.location();
        let favorites = FileFavorites::new(config.favorites_path());
        debug!(timezone = %tz, location = ?location.0, "Session ready");

        Ok(Session {
            config,
            tz,
            location,
            favorites,
        })
    }

    /// Clock and device location as of right now.
    pub fn context(&self) -> EvaluationContext {
        EvaluationContext::current(self.tz, &self.location)
    }

    /// Load a feed, falling back to the cached copy when the file can't be read.
    pub fn load_feed<K: FeedKind>(
        &self,
        path: &Path,
        ctx: &EvaluationContext,
    ) -> Result<Listings<K::Record, K::Metadata>> {
        let cache_dir = self.config.cache_path()?;
        let ttl = self.config.cache_ttl()?;
        let source = CachedListingSource::<K, _>::new(FileListingSource::<K>::new(path), &cache_dir, ttl);

        feed::load::<K>(&source, &ctx.now)
            .with_context(|| format!("Could not load {} from {}", K::NAME, path.display()))
    }

    /// Radius for `--within`, using the configured default when no value was given.
    pub fn radius(&self, within: Option<Option<f64>>) -> Result<Option<f64>> {
        let Some(km) = within else {
            return Ok(None);
        };
        let km = km.unwrap_or(self.config.default_radius_km);
        if !km.is_finite() || km < 0.0 {
            bail!("--within must be a non-negative distance in km");
        }
        Ok(Some(km))
    }
}
