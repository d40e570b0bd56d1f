use std::sync::Arc;
use std::time::Duration;

use cinescope_core::filters::FilterSelection;
use cinescope_tmdb::MovieSource;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::debounce::SearchDebouncer;
use crate::intent::apply_search_edit;
use crate::resolver::{BrowseState, QueryResolver};

/// One user's browse screen: raw search edits go through the debouncer, and
/// settled text and filter changes drive the resolver.
pub struct BrowseSession<S: ?Sized> {
    resolver: QueryResolver<S>,
    debouncer: SearchDebouncer,
    pump: JoinHandle<()>,
}

impl<S: MovieSource + ?Sized + 'static> BrowseSession<S> {
    /// Start the session and load the initial (trending) listing.
    pub async fn start(source: Arc<S>, search_delay: Duration) -> Self {
        let resolver = QueryResolver::new(source);
        let debouncer = SearchDebouncer::spawn(search_delay);

        let mut settled = debouncer.subscribe();
        let pump_resolver = resolver.clone();
        let pump = tokio::spawn(async move {
            while settled.changed().await.is_ok() {
                let search = settled.borrow_and_update().clone();
                // `submit` may have moved the resolver since the last settle,
                // so compare against its text rather than the debouncer's.
                if pump_resolver.snapshot().await.search == search {
                    debug!(search = %search, "settled search text unchanged");
                    continue;
                }
                debug!(search = %search, "search text settled");
                pump_resolver.set_search(search).await;
            }
        });

        resolver.set_query("", FilterSelection::default()).await;

        Self {
            resolver,
            debouncer,
            pump,
        }
    }

    pub fn resolver(&self) -> &QueryResolver<S> {
        &self.resolver
    }

    /// A keystroke-level search edit. Entering non-blank text puts the sort
    /// back to the default right away; the text itself reaches the resolver
    /// once it settles.
    pub async fn edit_search(&self, text: impl Into<String>) {
        let text = text.into();
        let mut filters = self.resolver.snapshot().await.filters;
        if apply_search_edit(&mut filters, &text) {
            self.resolver.set_filters(filters).await;
        }
        self.debouncer.edit(text);
    }

    /// Apply a new filter selection immediately, keeping the settled search.
    pub async fn set_filters(&self, filters: FilterSelection) {
        self.resolver.set_filters(filters).await;
    }

    /// Set search and filters together, bypassing the debounce. The sort is
    /// reset when the search is non-blank.
    pub async fn submit(&self, search: impl Into<String>, mut filters: FilterSelection) {
        let search = search.into();
        apply_search_edit(&mut filters, &search);
        self.resolver.set_query(search, filters).await;
    }

    pub async fn load_more(&self) -> bool {
        self.resolver.load_more().await
    }

    pub async fn retry(&self) -> bool {
        self.resolver.retry().await
    }

    pub async fn snapshot(&self) -> BrowseState {
        self.resolver.snapshot().await
    }

    pub async fn settled(&self) -> BrowseState {
        self.resolver.settled().await
    }

    /// Text typed but not yet settled.
    pub fn pending_search(&self) -> String {
        self.debouncer.pending()
    }

    pub async fn shutdown(&self) {
        self.pump.abort();
        self.resolver.shutdown().await;
    }
}
