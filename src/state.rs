use std::sync::Arc;

use crate::fetch::Scraper;

/// Shared application state passed to all handlers.
/// The scraper owns the HTTP client, so every request shares one
/// connection pool and cookie jar.
#[derive(Clone)]
pub struct AppState {
    pub scraper: Arc<Scraper>,
}
