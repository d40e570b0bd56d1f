//! Favorites list kept as one JSON array under a fixed storage key.
//!
//! Every operation reads the whole array and, when it changes something,
//! writes the whole array back. Nothing is cached between calls, so two
//! processes sharing the same storage follow last-writer-wins.

use chrono::{DateTime, Utc};
use cinescope_core::types::Movie;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::StorageError;
use crate::kv::KeyValueStore;

pub const FAVORITES_KEY: &str = "movie-discovery-favorites";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl FavoriteRecord {
    pub fn from_movie(movie: &Movie, added_at: DateTime<Utc>) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            release_date: movie.release_date.clone(),
            vote_average: movie.vote_average,
            added_at,
        }
    }
}

/// Favorites over any [`KeyValueStore`]. Operations never fail: storage
/// errors are logged and absorbed here.
#[derive(Clone)]
pub struct FavoritesStore<S> {
    storage: S,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Favorites in insertion order. Empty when nothing is stored, the stored
    /// value is corrupt, or storage cannot be read.
    pub async fn list(&self) -> Vec<FavoriteRecord> {
        match self.load().await {
            Ok(Some(favorites)) => favorites,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "error reading favorites");
                Vec::new()
            }
        }
    }

    /// Add `movie` stamped with the current time. No-op if already present.
    pub async fn add(&self, movie: &Movie) {
        let mut favorites = match self.load_for_update().await {
            Some(favorites) => favorites,
            None => return,
        };

        if favorites.iter().any(|f| f.id == movie.id) {
            debug!(movie_id = movie.id, "already a favorite");
            return;
        }

        favorites.push(FavoriteRecord::from_movie(movie, Utc::now()));
        if let Err(e) = self.save(&favorites).await {
            warn!(movie_id = movie.id, error = %e, "error adding to favorites");
        }
    }

    /// Remove by id. No-op if absent.
    pub async fn remove(&self, movie_id: i64) {
        let mut favorites = match self.load_for_update().await {
            Some(favorites) => favorites,
            None => return,
        };

        favorites.retain(|f| f.id != movie_id);
        if let Err(e) = self.save(&favorites).await {
            warn!(movie_id, error = %e, "error removing from favorites");
        }
    }

    pub async fn contains(&self, movie_id: i64) -> bool {
        self.list().await.iter().any(|f| f.id == movie_id)
    }

    /// Add if absent, remove if present. Returns whether `movie` is a
    /// favorite afterwards.
    pub async fn toggle(&self, movie: &Movie) -> bool {
        if self.contains(movie.id).await {
            self.remove(movie.id).await;
        } else {
            self.add(movie).await;
        }
        self.contains(movie.id).await
    }

    /// `Ok(None)` when the key is unset; a corrupt payload reads as empty.
    async fn load(&self) -> Result<Option<Vec<FavoriteRecord>>, StorageError> {
        let Some(raw) = self.storage.get_item(FAVORITES_KEY).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(favorites) => Ok(Some(favorites)),
            Err(e) => {
                warn!(error = %e, "stored favorites are corrupt; treating as empty");
                Ok(Some(Vec::new()))
            }
        }
    }

    /// Current list for a read-modify-write. `None` when storage could not be
    /// read at all, in which case nothing should be written either.
    async fn load_for_update(&self) -> Option<Vec<FavoriteRecord>> {
        match self.load().await {
            Ok(favorites) => Some(favorites.unwrap_or_default()),
            Err(e) => {
                warn!(error = %e, "error reading favorites");
                None
            }
        }
    }

    async fn save(&self, favorites: &[FavoriteRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(favorites)?;
        self.storage.set_item(FAVORITES_KEY, &raw).await
    }
}
