use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::FavoritesError;

/// Favorite crop ids, persisted as a JSON object next to the app.
#[derive(Debug, Clone, Default)]
pub struct FavoriteStore {
    path: PathBuf,
    favorites: HashMap<String, bool>,
}

impl FavoriteStore {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FavoritesError> {
        let path = path.as_ref().to_path_buf();

        let favorites = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, favorites })
    }

    /// An empty store that will save to `path`, used when the existing file
    /// cannot be read.
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            favorites: HashMap::new(),
        }
    }

    pub fn is_favorite(&self, crop_id: &str) -> bool {
        self.favorites.get(crop_id).copied().unwrap_or(false)
    }

    /// Flips the flag for `crop_id` and returns the new state.
    pub fn toggle(&mut self, crop_id: &str) -> bool {
        let next = !self.is_favorite(crop_id);
        self.favorites.insert(crop_id.to_string(), next);
        next
    }

    pub fn save(&self) -> Result<(), FavoritesError> {
        let json = serde_json::to_string_pretty(&self.favorites)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FavoriteStore::load(dir.path().join("favorites.json")).unwrap();
        assert!(!store.is_favorite("strawberry"));
    }

    #[test]
    fn toggles_survive_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");

        let mut store = FavoriteStore::load(&path).unwrap();
        assert!(store.toggle("strawberry"));
        assert!(store.toggle("kale"));
        assert!(!store.toggle("kale"));
        store.save().unwrap();

        let reloaded = FavoriteStore::load(&path).unwrap();
        assert!(reloaded.is_favorite("strawberry"));
        assert!(!reloaded.is_favorite("kale"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FavoriteStore::load(&path),
            Err(FavoritesError::Json(_))
        ));
    }
}
