//! One-shot lookups behind the details screen and the filter menu.

use std::sync::Arc;

use cinescope_core::error::ApiError;
use cinescope_core::types::{Genre, Movie, MovieDetails, WatchProviders};
use cinescope_tmdb::MovieSource;
use serde::Serialize;
use tracing::{debug, warn};

pub const SIMILAR_LIMIT: usize = 12;
pub const DEFAULT_REGION: &str = "US";
pub const GENRES_ERROR: &str = "Failed to load genres";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoviePage {
    pub details: MovieDetails,
    pub similar: Vec<Movie>,
}

/// Details and similar titles, fetched together. Either failing fails both.
pub async fn load_movie_page<S: MovieSource + ?Sized>(
    source: &S,
    movie_id: i64,
) -> Result<MoviePage, ApiError> {
    let (details, similar) = tokio::try_join!(
        source.movie_details(movie_id),
        source.similar(movie_id, 1)
    )?;

    let mut similar = similar.results;
    similar.truncate(SIMILAR_LIMIT);

    Ok(MoviePage { details, similar })
}

/// Offers for one region. The API always returns every region and the pick
/// happens here; `None` when the region has no entry.
pub async fn providers_for_region<S: MovieSource + ?Sized>(
    source: &S,
    movie_id: i64,
    region: &str,
) -> Result<Option<WatchProviders>, ApiError> {
    let mut response = source.watch_providers(movie_id).await?;
    let providers = response.results.remove(region);
    debug!(movie_id, region, found = providers.is_some(), "watch providers");
    Ok(providers)
}

/// Genre catalog. API errors pass through unchanged; a fetch that dies
/// without producing one is reported with the genre-specific fallback.
pub async fn load_genres<S: MovieSource + ?Sized + 'static>(
    source: Arc<S>,
) -> Result<Vec<Genre>, ApiError> {
    match tokio::spawn(async move { source.genres().await }).await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "genre fetch task failed");
            Err(ApiError::new(GENRES_ERROR, None))
        }
    }
}
