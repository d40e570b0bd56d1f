use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{BoxError, Json, Router};
use cinescope_browse::BrowseState;
use cinescope_browse::catalog;
use cinescope_core::error::{ErrorEnvelope, ServiceError};
use cinescope_core::filters::{FilterSelection, SortBy};
use cinescope_core::types::{Genre, Movie, WatchProviders};
use cinescope_tmdb::{ImageSize, image_url};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;
use crate::views::{FavoriteView, MovieDetailView};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(REQUEST_TIMEOUT),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        // Browse listing
        .route("/browse", get(get_browse).put(put_browse))
        .route("/browse/search", put(put_browse_search))
        .route("/browse/filters", put(put_browse_filters))
        .route("/browse/more", post(browse_more))
        .route("/browse/retry", post(browse_retry))
        .route("/sort-options", get(sort_options))
        .route("/genres", get(list_genres))
        // Movies
        .route("/movies/{id}", get(get_movie))
        .route("/movies/{id}/providers", get(get_movie_providers))
        .route("/images", get(get_image_url))
        // Favorites
        .route("/favorites", get(list_favorites).post(add_favorite))
        .route(
            "/favorites/{id}",
            get(get_favorite).delete(remove_favorite),
        )
        .route("/favorites/{id}/toggle", post(toggle_favorite))
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, error) = if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::GATEWAY_TIMEOUT,
            ServiceError::Internal("request timed out".into()),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(err.to_string()),
        )
    };
    (status, Json(ErrorEnvelope::from(&error)))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query("SELECT 1")
        .execute(&state.db)
        .await
        .map_err(|e| ServiceError::Internal(format!("database check failed: {e}")))?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Browse
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct BrowseQuery {
    #[serde(default)]
    wait: bool,
}

#[derive(Serialize)]
struct BrowseResponse {
    #[serde(flatten)]
    state: BrowseState,
    pending_search: String,
}

async fn browse_response(state: &AppState, wait: bool) -> Json<BrowseResponse> {
    let browse = if wait {
        state.browse.settled().await
    } else {
        state.browse.snapshot().await
    };
    Json(BrowseResponse {
        state: browse,
        pending_search: state.browse.pending_search(),
    })
}

async fn get_browse(
    State(state): State<AppState>,
    Query(q): Query<BrowseQuery>,
) -> Json<BrowseResponse> {
    browse_response(&state, q.wait).await
}

#[derive(Deserialize)]
struct BrowseRequest {
    #[serde(default)]
    search: String,
    #[serde(default)]
    filters: FilterSelection,
}

/// Set search and filters together; answers once the new listing settles.
async fn put_browse(
    State(state): State<AppState>,
    Json(body): Json<BrowseRequest>,
) -> Json<BrowseResponse> {
    state.browse.submit(body.search, body.filters).await;
    browse_response(&state, true).await
}

#[derive(Deserialize)]
struct SearchEdit {
    text: String,
}

/// Keystroke-level edit; the text is applied after the debounce delay.
async fn put_browse_search(
    State(state): State<AppState>,
    Json(body): Json<SearchEdit>,
) -> Json<BrowseResponse> {
    state.browse.edit_search(body.text).await;
    browse_response(&state, false).await
}

async fn put_browse_filters(
    State(state): State<AppState>,
    Json(filters): Json<FilterSelection>,
) -> Json<BrowseResponse> {
    state.browse.set_filters(filters).await;
    browse_response(&state, true).await
}

#[derive(Serialize)]
struct ActionResponse {
    accepted: bool,
    #[serde(flatten)]
    browse: BrowseResponse,
}

async fn browse_more(State(state): State<AppState>) -> Json<ActionResponse> {
    let accepted = state.browse.load_more().await;
    let Json(browse) = browse_response(&state, accepted).await;
    Json(ActionResponse { accepted, browse })
}

async fn browse_retry(State(state): State<AppState>) -> Json<ActionResponse> {
    let accepted = state.browse.retry().await;
    let Json(browse) = browse_response(&state, accepted).await;
    Json(ActionResponse { accepted, browse })
}

#[derive(Serialize)]
struct SortOption {
    value: String,
    label: &'static str,
}

async fn sort_options() -> Json<Vec<SortOption>> {
    Json(
        SortBy::OPTIONS
            .iter()
            .map(|s| SortOption {
                value: s.to_string(),
                label: s.label(),
            })
            .collect(),
    )
}

#[derive(Serialize)]
struct GenresResponse {
    genres: Vec<Genre>,
}

async fn list_genres(State(state): State<AppState>) -> Result<Json<GenresResponse>, AppError> {
    let genres = catalog::load_genres(state.source.clone()).await?;
    Ok(Json(GenresResponse { genres }))
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDetailView>, AppError> {
    let page = catalog::load_movie_page(state.source.as_ref(), id).await?;
    let favorite = state.favorites.contains(id).await;
    Ok(Json(MovieDetailView::new(page, favorite)))
}

#[derive(Deserialize)]
struct RegionQuery {
    region: Option<String>,
}

#[derive(Serialize)]
struct ProvidersResponse {
    movie_id: i64,
    region: String,
    providers: Option<WatchProviders>,
}

async fn get_movie_providers(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<RegionQuery>,
) -> Result<Json<ProvidersResponse>, AppError> {
    let region = q
        .region
        .map(|r| r.to_ascii_uppercase())
        .unwrap_or_else(|| state.region.clone());
    let providers = catalog::providers_for_region(state.source.as_ref(), id, &region).await?;
    Ok(Json(ProvidersResponse {
        movie_id: id,
        region,
        providers,
    }))
}

#[derive(Deserialize)]
struct ImageQuery {
    path: Option<String>,
    size: Option<String>,
}

#[derive(Serialize)]
struct ImageResponse {
    url: String,
}

async fn get_image_url(Query(q): Query<ImageQuery>) -> Result<Json<ImageResponse>, AppError> {
    let size = match q.size.as_deref() {
        None => ImageSize::default(),
        Some(s) => ImageSize::parse(s)
            .ok_or_else(|| ServiceError::BadRequest(format!("unknown image size: {s}")))?,
    };
    Ok(Json(ImageResponse {
        url: image_url(q.path.as_deref(), size),
    }))
}

// ---------------------------------------------------------------------------
// Favorites
// ---------------------------------------------------------------------------

async fn list_favorites(State(state): State<AppState>) -> Json<Vec<FavoriteView>> {
    let favorites = state.favorites.list().await;
    Json(favorites.into_iter().map(FavoriteView::from).collect())
}

#[derive(Serialize)]
struct FavoriteStatus {
    id: i64,
    favorite: bool,
}

async fn add_favorite(
    State(state): State<AppState>,
    Json(movie): Json<Movie>,
) -> (StatusCode, Json<FavoriteStatus>) {
    state.favorites.add(&movie).await;
    let favorite = state.favorites.contains(movie.id).await;
    (
        StatusCode::CREATED,
        Json(FavoriteStatus {
            id: movie.id,
            favorite,
        }),
    )
}

async fn get_favorite(State(state): State<AppState>, Path(id): Path<i64>) -> Json<FavoriteStatus> {
    let favorite = state.favorites.contains(id).await;
    Json(FavoriteStatus { id, favorite })
}

async fn remove_favorite(State(state): State<AppState>, Path(id): Path<i64>) -> StatusCode {
    state.favorites.remove(id).await;
    StatusCode::NO_CONTENT
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(movie): Json<Movie>,
) -> Result<Json<FavoriteStatus>, AppError> {
    if movie.id != id {
        return Err(ServiceError::BadRequest(format!(
            "movie id {} does not match path id {id}",
            movie.id
        ))
        .into());
    }
    let favorite = state.favorites.toggle(&movie).await;
    Ok(Json(FavoriteStatus { id, favorite }))
}
