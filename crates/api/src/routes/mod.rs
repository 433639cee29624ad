pub mod health;
pub mod records;
pub mod taxonomy;

use axum::Router;

use crate::state::AppState;

/// Build the full route tree. All routes live at the root.
///
/// ```text
/// GET    /                 liveness
/// GET    /health           service and database health
///
/// GET    /categories       list categories
/// GET    /types            list types
///
/// GET    /records          filtered record listing
/// POST   /record           create record
/// GET    /record/{id}      fetch record
/// PUT    /record/{id}      edit record
/// DELETE /record/{id}      delete record
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(taxonomy::router())
        .merge(records::router())
}
