//! Request extractors whose rejections render as [`AppError`].

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use records_core::record::parse_strict_id_list;
use records_core::types::DbId;
use records_db::models::record::RecordPayload;
use serde::Deserialize;

use crate::error::AppError;

/// `axum::extract::Path` with a JSON 400 on malformed segments, e.g. a
/// non-numeric record id.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with a JSON 400 on undecodable query strings.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Record write body, accepted as `application/json` or
/// `application/x-www-form-urlencoded`.
///
/// In a form body `categoriesId` is a comma-separated list
/// (`categoriesId=1,2`); an empty value means no categories.
#[derive(Debug)]
pub struct RecordBody(pub RecordPayload);

/// URL-encoded shape of [`RecordPayload`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordForm {
    name: String,
    content: Option<String>,
    type_id: DbId,
    categories_id: String,
}

impl TryFrom<RecordForm> for RecordPayload {
    type Error = AppError;

    fn try_from(form: RecordForm) -> Result<Self, Self::Error> {
        let categories_id = parse_strict_id_list(&form.categories_id)
            .map_err(|e| AppError::BadRequest(format!("categoriesId: {e}")))?;
        Ok(RecordPayload {
            name: form.name,
            content: form.content,
            type_id: form.type_id,
            categories_id,
        })
    }
}

impl<S> FromRequest<S> for RecordBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(form) = Form::<RecordForm>::from_request(req, state).await?;
            Ok(RecordBody(form.try_into()?))
        } else {
            let Json(payload) = Json::<RecordPayload>::from_request(req, state).await?;
            Ok(RecordBody(payload))
        }
    }
}
