use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ListingsError, ListingsResult};

/// Persisted set of favorited listing ids.
pub trait FavoritesStore {
    fn get(&self) -> ListingsResult<BTreeSet<String>>;

    /// Returns true if the id was newly added.
    fn add(&mut self, id: &str) -> ListingsResult<bool>;

    /// Returns true if the id was present.
    fn remove(&mut self, id: &str) -> ListingsResult<bool>;

    fn contains(&self, id: &str) -> ListingsResult<bool> {
        Ok(self.get()?.contains(id))
    }
}

/// In-memory favorites, lost on exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryFavorites {
    ids: BTreeSet<String>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryFavorites {
    fn get(&self) -> ListingsResult<BTreeSet<String>> {
        Ok(self.ids.clone())
    }

    fn add(&mut self, id: &str) -> ListingsResult<bool> {
        Ok(self.ids.insert(id.to_string()))
    }

    fn remove(&mut self, id: &str) -> ListingsResult<bool> {
        Ok(self.ids.remove(id))
    }
}

/// Favorites stored as a sorted JSON array of ids.
#[derive(Debug, Clone)]
pub struct FileFavorites {
    path: PathBuf,
}

impl FileFavorites {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileFavorites { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, ids: &BTreeSet<String>) -> ListingsResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(ids)
            .map_err(|e| ListingsError::Favorites(e.to_string()))?;

        // Write-then-rename so a crash never leaves a truncated file
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), count = ids.len(), "Saved favorites");
        Ok(())
    }
}

impl FavoritesStore for FileFavorites {
    fn get(&self) -> ListingsResult<BTreeSet<String>> {
        if !self.path.exists() {
            return Ok(BTreeSet::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeSet::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            ListingsError::Favorites(format!("{}: {}", self.path.display(), e))
        })
    }

    fn add(&mut self, id: &str) -> ListingsResult<bool> {
        let mut ids = self.get()?;
        let added = ids.insert(id.to_string());
        if added {
            self.save(&ids)?;
        }
        Ok(added)
    }

    fn remove(&mut self, id: &str) -> ListingsResult<bool> {
        let mut ids = self.get()?;
        let removed = ids.remove(id);
        if removed {
            self.save(&ids)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_adds_and_removes() {
        let mut store = MemoryFavorites::new();
        assert!(store.add("evt-1").unwrap());
        assert!(!store.add("evt-1").unwrap());
        assert!(store.contains("evt-1").unwrap());
        assert!(store.remove("evt-1").unwrap());
        assert!(!store.remove("evt-1").unwrap());
        assert!(store.get().unwrap().is_empty());
    }

    #[test]
    fn file_store_starts_empty_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFavorites::new(dir.path().join("favorites.json"));
        assert!(store.get().unwrap().is_empty());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/favorites.json");

        let mut store = FileFavorites::new(&path);
        store.add("b").unwrap();
        store.add("a").unwrap();

        let reopened = FileFavorites::new(&path);
        let ids: Vec<_> = reopened.get().unwrap().into_iter().collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        let mut store = FileFavorites::new(&path);
        store.add("a").unwrap();
        store.remove("a").unwrap();

        assert!(FileFavorites::new(&path).get().unwrap().is_empty());
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileFavorites::new(&path);
        assert!(matches!(store.get(), Err(ListingsError::Favorites(_))));
    }
}
