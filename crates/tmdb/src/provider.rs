use std::sync::Arc;

use cinescope_core::error::ApiError;
use cinescope_core::types::{Genre, Movie, MovieDetails, Paged, WatchProvidersResponse};

use crate::DiscoverParams;

/// Source of movie listings and details.
#[async_trait::async_trait]
pub trait MovieSource: Send + Sync {
    /// Trending movies of the week.
    async fn trending(&self, page: i64) -> Result<Paged<Movie>, ApiError>;

    /// Free-text title search.
    async fn search(&self, query: &str, page: i64) -> Result<Paged<Movie>, ApiError>;

    /// Listing filtered by genre/year and ordered by a combined sort token.
    async fn discover(&self, params: &DiscoverParams) -> Result<Paged<Movie>, ApiError>;

    async fn movie_details(&self, movie_id: i64) -> Result<MovieDetails, ApiError>;

    async fn similar(&self, movie_id: i64, page: i64) -> Result<Paged<Movie>, ApiError>;

    /// Genre catalog.
    async fn genres(&self) -> Result<Vec<Genre>, ApiError>;

    /// Watch providers for every region.
    async fn watch_providers(&self, movie_id: i64) -> Result<WatchProvidersResponse, ApiError>;
}

#[async_trait::async_trait]
impl<T: MovieSource + ?Sized> MovieSource for Arc<T> {
    async fn trending(&self, page: i64) -> Result<Paged<Movie>, ApiError> {
        (**self).trending(page).await
    }

    async fn search(&self, query: &str, page: i64) -> Result<Paged<Movie>, ApiError> {
        (**self).search(query, page).await
    }

    async fn discover(&self, params: &DiscoverParams) -> Result<Paged<Movie>, ApiError> {
        (**self).discover(params).await
    }

    async fn movie_details(&self, movie_id: i64) -> Result<MovieDetails, ApiError> {
        (**self).movie_details(movie_id).await
    }

    async fn similar(&self, movie_id: i64, page: i64) -> Result<Paged<Movie>, ApiError> {
        (**self).similar(movie_id, page).await
    }

    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        (**self).genres().await
    }

    async fn watch_providers(&self, movie_id: i64) -> Result<WatchProvidersResponse, ApiError> {
        (**self).watch_providers(movie_id).await
    }
}
