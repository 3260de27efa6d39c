//! Client-side favorite presets.
//!
//! The server has its own favourite flag on presets; this is the local list a
//! front-end keeps for itself, persisted through a small key-value store.

mod store;

pub use store::{FavoritesStore, JsonFileStore, MemoryStore};

use std::collections::BTreeSet;
use thiserror::Error;

/// Storage key of the favorites list.
pub const FAVORITES_KEY: &str = "pianoteq_favorites";

/// Errors from favorites storage.
#[derive(Error, Debug)]
pub enum FavoritesError {
    /// IO error reading/writing the store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Store contents could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Favorite preset names backed by a [`FavoritesStore`].
///
/// Every mutation writes the full list back to the store.
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    names: BTreeSet<String>,
}

impl<S: FavoritesStore> Favorites<S> {
    /// Load the current list from `store`. An absent list is empty.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be read.
    pub async fn load(store: S) -> Result<Self, FavoritesError> {
        let names = store
            .get(FAVORITES_KEY)
            .await?
            .unwrap_or_default()
            .into_iter()
            .collect();
        Ok(Self { store, names })
    }

    /// Whether `preset` is a favorite.
    #[must_use]
    pub fn is_favorite(&self, preset: &str) -> bool {
        self.names.contains(preset)
    }

    /// Flip membership of `preset`; returns whether it is now a favorite.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written.
    pub async fn toggle(&mut self, preset: &str) -> Result<bool, FavoritesError> {
        let now_favorite = if self.names.remove(preset) {
            false
        } else {
            self.names.insert(preset.to_string());
            true
        };
        self.save().await?;
        Ok(now_favorite)
    }

    /// Mark `preset` as a favorite.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written.
    pub async fn add(&mut self, preset: &str) -> Result<(), FavoritesError> {
        self.names.insert(preset.to_string());
        self.save().await
    }

    /// Unmark `preset`.
    ///
    /// # Errors
    ///
    /// Returns error if the store cannot be written.
    pub async fn remove(&mut self, preset: &str) -> Result<(), FavoritesError> {
        self.names.remove(preset);
        self.save().await
    }

    /// All favorites, sorted by name.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    async fn save(&self) -> Result<(), FavoritesError> {
        tracing::debug!(count = self.names.len(), "saving favorites");
        self.store.set(FAVORITES_KEY, self.all()).await
    }
}
