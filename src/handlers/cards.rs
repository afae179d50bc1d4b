use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::Card;
use crate::state::AppState;

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CardQuery {
    pub url: Option<String>,
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /?url=<encoded-url>
///
/// Fetches the URL and returns its card. Errors carry an `error` message and,
/// for non-2xx upstream responses, the `upstream_status`.
pub async fn get_card(
    State(state): State<AppState>,
    Query(params): Query<CardQuery>,
) -> AppResult<Json<Card>> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::InvalidUrl("missing url parameter".into()))?;

    let card = state.scraper.fetch_card(&url).await?;
    Ok(Json(card))
}
