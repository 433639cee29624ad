use axum::routing::{get, post};
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// ```text
/// GET    /records        -> list_records
/// POST   /record         -> create_record
/// GET    /record/{id}    -> get_record
/// PUT    /record/{id}    -> edit_record
/// DELETE /record/{id}    -> delete_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/records", get(records::list_records))
        .route("/record", post(records::create_record))
        .route(
            "/record/{id}",
            get(records::get_record)
                .put(records::edit_record)
                .delete(records::delete_record),
        )
}
