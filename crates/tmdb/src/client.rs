//! TMDB (The Movie Database) API client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use cinescope_core::error::ApiError;
use cinescope_core::types::{Genre, GenreList, Movie, MovieDetails, Paged, WatchProvidersResponse};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::provider::MovieSource;
use crate::{DiscoverParams, QueryParams, TmdbConfig};

#[derive(Clone)]
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: TmdbConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Issue one GET against `path` and decode the JSON body as `T`.
    ///
    /// The API key is always attached. Non-2xx responses become an
    /// [`ApiError`] carrying the body's `status_message` (or
    /// `HTTP <code>: <reason>`) and the status code; a request that never got
    /// a response becomes the generic network error with no status.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.config.base_url);
        debug!(url = %url, params = ?params.pairs(), "TMDB request");

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params.pairs())
            .send()
            .await
            .map_err(|e| {
                // The error's own URL carries the API key.
                let e = e.without_url();
                warn!(url = %url, error = %e, "TMDB request failed without a response");
                ApiError::network()
            })?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| {
            let e = e.without_url();
            warn!(url = %url, error = %e, "failed to read TMDB response body");
            ApiError::network()
        })?;

        if !status.is_success() {
            let message = error_message(status, &body);
            debug!(url = %url, status = status.as_u16(), message = %message, "TMDB error response");
            return Err(ApiError::new(message, Some(status.as_u16())));
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!(url = %url, error = %e, "unexpected TMDB response shape");
            ApiError::new(format!("Invalid response from server: {e}"), None)
        })
    }
}

/// Prefer the API's own `status_message`; fall back to the status line.
fn error_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["status_message"].as_str().map(|s| s.to_string()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )
        })
}

#[async_trait::async_trait]
impl MovieSource for TmdbClient {
    async fn trending(&self, page: i64) -> Result<Paged<Movie>, ApiError> {
        self.request("/trending/movie/week", &QueryParams::new().set("page", page))
            .await
    }

    async fn search(&self, query: &str, page: i64) -> Result<Paged<Movie>, ApiError> {
        let params = QueryParams::new().set("query", query).set("page", page);
        self.request("/search/movie", &params).await
    }

    async fn discover(&self, params: &DiscoverParams) -> Result<Paged<Movie>, ApiError> {
        self.request("/discover/movie", &params.to_query()).await
    }

    async fn movie_details(&self, movie_id: i64) -> Result<MovieDetails, ApiError> {
        self.request(&format!("/movie/{movie_id}"), &QueryParams::new())
            .await
    }

    async fn similar(&self, movie_id: i64, page: i64) -> Result<Paged<Movie>, ApiError> {
        self.request(
            &format!("/movie/{movie_id}/similar"),
            &QueryParams::new().set("page", page),
        )
        .await
    }

    async fn genres(&self) -> Result<Vec<Genre>, ApiError> {
        let list: GenreList = self
            .request("/genre/movie/list", &QueryParams::new())
            .await?;
        Ok(list.genres)
    }

    async fn watch_providers(&self, movie_id: i64) -> Result<WatchProvidersResponse, ApiError> {
        // The endpoint always returns every region; callers pick one.
        self.request(
            &format!("/movie/{movie_id}/watch/providers"),
            &QueryParams::new(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_status_message() {
        let body = br#"{"status_code":34,"status_message":"The resource you requested could not be found."}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::NOT_FOUND, body),
            "The resource you requested could not be found."
        );
    }

    #[test]
    fn error_message_falls_back_to_status_line() {
        assert_eq!(
            error_message(reqwest::StatusCode::SERVICE_UNAVAILABLE, b"<html>oops</html>"),
            "HTTP 503: Service Unavailable"
        );
        assert_eq!(
            error_message(reqwest::StatusCode::UNAUTHORIZED, br#"{"success":false}"#),
            "HTTP 401: Unauthorized"
        );
    }
}
