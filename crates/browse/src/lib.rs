pub mod catalog;
pub mod debounce;
pub mod intent;
pub mod resolver;
pub mod session;

pub use debounce::{DEFAULT_SEARCH_DELAY, SearchDebouncer};
pub use intent::{Endpoint, QueryIntent, apply_search_edit};
pub use resolver::{BrowseState, QueryResolver, UNEXPECTED_ERROR};
pub use session::BrowseSession;
