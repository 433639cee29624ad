//! Handlers for records.
//!
//! Every success is a 200: reads return the record(s) directly, writes
//! return a confirmation message. A missing record is `null` on read and a
//! generic 500 on update or delete.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use records_core::error::CoreError;
use records_core::record_filter::{RecordFilter, RecordFilterParams};
use records_core::types::DbId;
use records_db::repositories::RecordRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, RecordBody};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /records?contains=&createdFrom=&createdTo=&editedFrom=&editedTo=&category=&type=
///
/// List records matching the filter, each with its category ids.
pub async fn list_records(
    State(state): State<AppState>,
    ApiQuery(pairs): ApiQuery<Vec<(String, String)>>,
) -> AppResult<impl IntoResponse> {
    let params = RecordFilterParams::from_pairs(pairs)?;
    let filter = RecordFilter::from_params(&params)?;
    let records = RecordRepo::list(&state.pool, &filter.predicate()).await?;

    Ok(Json(records))
}

/// GET /record/{id}
///
/// Fetch one record with its category ids. An unknown id yields `null`.
pub async fn get_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = RecordRepo::find_by_id(&state.pool, id).await?;

    Ok(Json(record))
}

/// POST /record
pub async fn create_record(
    State(state): State<AppState>,
    RecordBody(input): RecordBody,
) -> AppResult<impl IntoResponse> {
    let record = RecordRepo::create(&state.pool, &input).await?;

    tracing::info!(
        record_id = record.id,
        type_id = record.type_id,
        categories = record.category_ids.len(),
        "Record created"
    );

    Ok(Json(MessageResponse::new("Successfully created record!")))
}

/// PUT /record/{id}
///
/// Replace name, content, type and the full category set.
pub async fn edit_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    RecordBody(input): RecordBody,
) -> AppResult<impl IntoResponse> {
    let record = RecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Record",
            id,
        }))?;

    tracing::info!(
        record_id = record.id,
        categories = record.category_ids.len(),
        "Record edited"
    );

    Ok(Json(MessageResponse::new("Successfully edited record!")))
}

/// DELETE /record/{id}
pub async fn delete_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = RecordRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Record",
            id,
        }));
    }

    tracing::info!(record_id = id, "Record deleted");

    Ok(Json(MessageResponse::new("Successfully deleted record!")))
}
