use axum::routing::get;
use axum::Router;

use crate::handlers::taxonomy;
use crate::state::AppState;

/// ```text
/// GET /categories   -> list_categories
/// GET /types        -> list_types
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(taxonomy::list_categories))
        .route("/types", get(taxonomy::list_types))
}
