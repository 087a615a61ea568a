use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::error::{ListingsError, ListingsResult};
use crate::feed::{self, FeedKind};

/// Where a feed payload comes from.
pub trait ListingSource<K: FeedKind> {
    fn fetch_listings(&self) -> ListingsResult<K::Payload>;

    /// Whether a previously stored payload is fresh enough to serve.
    fn can_use_cache(&self) -> bool {
        false
    }
}

/// Reads a feed payload from a JSON file.
pub struct FileListingSource<K> {
    path: PathBuf,
    kind: PhantomData<K>,
}

impl<K: FeedKind> FileListingSource<K> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileListingSource {
            path: path.into(),
            kind: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<K: FeedKind> ListingSource<K> for FileListingSource<K> {
    fn fetch_listings(&self) -> ListingsResult<K::Payload> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            ListingsError::FeedUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        feed::parse_payload::<K>(&json)
    }
}

/// Wraps a source, keeping the last good payload on disk and serving it
/// when the source fails.
pub struct CachedListingSource<K, S> {
    inner: S,
    cache_path: PathBuf,
    ttl: Duration,
    kind: PhantomData<K>,
}

impl<K: FeedKind, S: ListingSource<K>> CachedListingSource<K, S> {
    /// Cache lives at `<cache_dir>/<feed name>.json`.
    pub fn new(inner: S, cache_dir: &Path, ttl: Duration) -> Self {
        CachedListingSource {
            inner,
            cache_path: cache_dir.join(format!("{}.json", K::NAME)),
            ttl,
            kind: PhantomData,
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    fn write_cache(&self, payload: &K::Payload) -> ListingsResult<()> {
        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(payload)
            .map_err(|e| ListingsError::FeedParse(e.to_string()))?;

        let temp = self.cache_path.with_extension("json.tmp");
        std::fs::write(&temp, json)?;
        std::fs::rename(&temp, &self.cache_path)?;
        Ok(())
    }

    fn read_cache(&self) -> ListingsResult<K::Payload> {
        let json = std::fs::read_to_string(&self.cache_path)?;
        feed::parse_payload::<K>(&json)
    }

    fn cache_age(&self) -> Option<Duration> {
        let modified = std::fs::metadata(&self.cache_path).ok()?.modified().ok()?;
        // A timestamp in the future counts as brand new
        Some(SystemTime::now().duration_since(modified).unwrap_or_default())
    }
}

impl<K: FeedKind, S: ListingSource<K>> ListingSource<K> for CachedListingSource<K, S> {
    fn fetch_listings(&self) -> ListingsResult<K::Payload> {
        match self.inner.fetch_listings() {
            Ok(payload) => {
                if let Err(e) = self.write_cache(&payload) {
                    warn!(feed = K::NAME, error = %e, "Could not update listing cache");
                } else {
                    debug!(feed = K::NAME, path = %self.cache_path.display(), "Updated listing cache");
                }
                Ok(payload)
            }
            Err(e) if self.can_use_cache() => {
                warn!(feed = K::NAME, error = %e, "Fetch failed, serving cached listings");
                self.read_cache()
            }
            Err(e) => Err(e),
        }
    }

    fn can_use_cache(&self) -> bool {
        self.cache_age().is_some_and(|age| age <= self.ttl)
    }
}
