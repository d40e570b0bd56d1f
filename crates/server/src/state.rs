use std::sync::Arc;

use cinescope_browse::BrowseSession;
use cinescope_db::{FavoritesStore, SqliteKvStore};
use cinescope_tmdb::MovieSource;
use sqlx::SqlitePool;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub source: Arc<dyn MovieSource>,
    pub browse: Arc<BrowseSession<dyn MovieSource>>,
    pub favorites: FavoritesStore<SqliteKvStore>,
    pub region: String,
}

impl AppState {
    /// Wire the favorites store to `db` and start the browse session, which
    /// loads the trending listing right away.
    pub async fn new(
        db: SqlitePool,
        source: Arc<dyn MovieSource>,
        region: String,
        search_delay: std::time::Duration,
    ) -> Self {
        let browse = Arc::new(BrowseSession::start(source.clone(), search_delay).await);
        Self {
            favorites: FavoritesStore::new(SqliteKvStore::new(db.clone())),
            db,
            source,
            browse,
            region,
        }
    }
}
