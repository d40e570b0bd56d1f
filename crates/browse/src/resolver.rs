//! Paged movie listing driven by search text, filters and "load more".
//!
//! Only one logical query is current at a time. Every request gets the next
//! generation number and its own cancellation token; issuing a request cancels
//! the previous token. A finished request is applied only if its generation is
//! still the latest and its token was not cancelled, so a late response from a
//! superseded request can never overwrite newer results even when the abort
//! did not reach the transport in time.

use std::sync::Arc;

use cinescope_core::error::ApiError;
use cinescope_core::filters::FilterSelection;
use cinescope_core::types::{Movie, Paged};
use cinescope_tmdb::MovieSource;
use serde::Serialize;
use tokio::sync::{Mutex, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::intent::QueryIntent;

/// Shown when a request fails for a reason other than an API error.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowseState {
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    pub page: i64,
    pub has_more: bool,
    pub total_results: i64,
    pub search: String,
    pub filters: FilterSelection,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            loading: false,
            error: None,
            page: 1,
            has_more: true,
            total_results: 0,
            search: String::new(),
            filters: FilterSelection::default(),
        }
    }
}

struct Inner {
    state: BrowseState,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl Inner {
    fn new() -> Self {
        Self {
            state: BrowseState::default(),
            generation: 0,
            in_flight: None,
        }
    }

    /// Cancel whatever is outstanding and claim a new generation.
    fn begin(&mut self) -> (u64, CancellationToken) {
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }
        self.generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        self.state.loading = true;
        self.state.error = None;
        (self.generation, token)
    }

    /// Apply a finished request. Returns false (and changes nothing) when the
    /// request has been superseded or cancelled.
    fn complete(
        &mut self,
        generation: u64,
        token: &CancellationToken,
        page: i64,
        reset: bool,
        outcome: Result<Paged<Movie>, String>,
    ) -> bool {
        if generation != self.generation || token.is_cancelled() {
            return false;
        }

        match outcome {
            Ok(response) => {
                self.state.has_more = response.has_more_after(page);
                self.state.total_results = response.total_results;
                if reset {
                    self.state.movies = response.results;
                } else {
                    self.state.movies.extend(response.results);
                }
            }
            Err(message) => {
                self.state.error = Some(message);
            }
        }

        self.state.loading = false;
        self.in_flight = None;
        true
    }

    /// Drop the current request without applying anything.
    fn abandon(&mut self) {
        if let Some(token) = self.in_flight.take() {
            token.cancel();
        }
        self.generation += 1;
        self.state.loading = false;
    }
}

/// Resolves search/filter/page changes into listing requests against a
/// [`MovieSource`] and keeps a single consistent [`BrowseState`].
pub struct QueryResolver<S: ?Sized> {
    source: Arc<S>,
    inner: Arc<Mutex<Inner>>,
    updates: Arc<watch::Sender<BrowseState>>,
}

impl<S: ?Sized> Clone for QueryResolver<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            inner: self.inner.clone(),
            updates: self.updates.clone(),
        }
    }
}

impl<S: MovieSource + ?Sized + 'static> QueryResolver<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (updates, _) = watch::channel(BrowseState::default());
        Self {
            source,
            inner: Arc::new(Mutex::new(Inner::new())),
            updates: Arc::new(updates),
        }
    }

    pub async fn snapshot(&self) -> BrowseState {
        self.inner.lock().await.state.clone()
    }

    /// Receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<BrowseState> {
        self.updates.subscribe()
    }

    /// Wait until no current request is outstanding and return that state.
    pub async fn settled(&self) -> BrowseState {
        let mut rx = self.subscribe();
        let result = rx.wait_for(|s| !s.loading).await.map(|s| s.clone());
        match result {
            Ok(state) => state,
            Err(_) => self.snapshot().await,
        }
    }

    /// Replace search text and filters together and load page 1 from scratch.
    /// Issuing the same query again re-fetches it.
    pub async fn set_query(&self, search: impl Into<String>, filters: FilterSelection) {
        let mut inner = self.inner.lock().await;
        inner.state.search = search.into();
        inner.state.filters = filters;
        self.restart(&mut inner);
    }

    /// Change the search text, keeping the current filters.
    pub async fn set_search(&self, search: impl Into<String>) {
        let mut inner = self.inner.lock().await;
        inner.state.search = search.into();
        self.restart(&mut inner);
    }

    /// Change the filters, keeping the current search text.
    pub async fn set_filters(&self, filters: FilterSelection) {
        let mut inner = self.inner.lock().await;
        inner.state.filters = filters;
        self.restart(&mut inner);
    }

    /// Request the next page. Ignored (returns false) while a request is
    /// loading or when there are no more pages; calls are never queued.
    pub async fn load_more(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.state.loading || !inner.state.has_more {
            debug!(
                loading = inner.state.loading,
                has_more = inner.state.has_more,
                "load more ignored"
            );
            return false;
        }
        inner.state.page += 1;
        let page = inner.state.page;
        self.issue(&mut inner, page, false);
        true
    }

    /// Re-issue the current page after an error. Page 1 replaces the list,
    /// later pages append. Ignored (returns false) while loading or when the
    /// last request did not fail, since the page is already in the list.
    pub async fn retry(&self) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.state.loading || inner.state.error.is_none() {
            debug!(
                loading = inner.state.loading,
                failed = inner.state.error.is_some(),
                "retry ignored"
            );
            return false;
        }
        let page = inner.state.page;
        self.issue(&mut inner, page, page <= 1);
        true
    }

    /// Cancel the outstanding request, if any. Nothing from it will be applied.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.lock().await;
        inner.abandon();
        self.publish(&inner);
    }

    fn restart(&self, inner: &mut Inner) {
        inner.state.page = 1;
        inner.state.has_more = true;
        inner.state.movies.clear();
        self.issue(inner, 1, true);
    }

    fn issue(&self, inner: &mut Inner, page: i64, reset: bool) {
        let (generation, token) = inner.begin();
        let intent = QueryIntent {
            search: inner.state.search.clone(),
            filters: inner.state.filters,
            page,
        };
        let endpoint = intent.endpoint();
        debug!(generation, endpoint = endpoint.name(), page, reset, "issuing listing request");
        self.publish(inner);

        let source = self.source.clone();
        let shared = self.inner.clone();
        let updates = self.updates.clone();
        tokio::spawn(async move {
            let mut fetch = tokio::spawn(async move { endpoint.fetch(source.as_ref()).await });

            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    fetch.abort();
                    debug!(generation, "listing request cancelled");
                    return;
                }
                joined = &mut fetch => joined,
            };

            let outcome = match outcome {
                Ok(Ok(page)) => Ok(page),
                Ok(Err(ApiError { message, status_code })) => {
                    debug!(generation, status = ?status_code, message = %message, "listing request failed");
                    Err(message)
                }
                Err(e) => {
                    warn!(generation, error = %e, "listing request task failed");
                    Err(UNEXPECTED_ERROR.to_string())
                }
            };

            let mut inner = shared.lock().await;
            if inner.complete(generation, &token, page, reset, outcome) {
                updates.send_replace(inner.state.clone());
            } else {
                debug!(generation, current = inner.generation, "discarding stale listing response");
            }
        });
    }

    fn publish(&self, inner: &Inner) {
        self.updates.send_replace(inner.state.clone());
    }
}
