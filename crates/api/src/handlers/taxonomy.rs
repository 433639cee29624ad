//! Handlers for the read-only classification lists (types and categories).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use records_db::repositories::{CategoryRepo, TypeRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /types
pub async fn list_types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let types = TypeRepo::list(&state.pool).await?;
    Ok(Json(types))
}
