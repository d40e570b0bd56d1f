//! Which listing endpoint a search/filter combination maps to.

use cinescope_core::error::ApiError;
use cinescope_core::filters::{FilterSelection, SortBy, SortOrder};
use cinescope_core::types::{Movie, Paged};
use cinescope_tmdb::{DiscoverParams, MovieSource};
use serde::Serialize;

/// One resolved listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Trending { page: i64 },
    Search { query: String, page: i64 },
    Discover(DiscoverParams),
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Trending { .. } => "trending",
            Self::Search { .. } => "search",
            Self::Discover(_) => "discover",
        }
    }

    pub async fn fetch<S: MovieSource + ?Sized>(&self, source: &S) -> Result<Paged<Movie>, ApiError> {
        match self {
            Self::Trending { page } => source.trending(*page).await,
            Self::Search { query, page } => source.search(query, *page).await,
            Self::Discover(params) => source.discover(params).await,
        }
    }
}

/// Search text, filters and target page of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryIntent {
    pub search: String,
    pub filters: FilterSelection,
    pub page: i64,
}

impl QueryIntent {
    /// Non-blank search text wins over any filter; otherwise an active filter
    /// selects discover, and the default selection falls through to trending.
    pub fn endpoint(&self) -> Endpoint {
        let query = self.search.trim();
        if !query.is_empty() {
            return Endpoint::Search {
                query: query.to_string(),
                page: self.page,
            };
        }

        if self.filters.is_active() {
            return Endpoint::Discover(DiscoverParams {
                page: self.page,
                with_genres: self.filters.genre,
                primary_release_year: self.filters.year,
                sort_by: Some(self.filters.effective_sort_token()),
            });
        }

        Endpoint::Trending { page: self.page }
    }
}

/// A search result cannot be client-sorted, so entering non-blank search text
/// puts the sort back to the default. Returns true when `filters` changed.
pub fn apply_search_edit(filters: &mut FilterSelection, search: &str) -> bool {
    let default_sort = filters.sort_by == SortBy::DEFAULT && filters.sort_order == SortOrder::Desc;
    if search.trim().is_empty() || default_sort {
        return false;
    }
    filters.reset_sort();
    true
}
