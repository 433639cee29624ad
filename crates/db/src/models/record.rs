//! Record model and write payload.

use records_core::types::{DbId, Timestamp};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `records` table together with the ids of its categories.
///
/// Serializes as `{ id, name, content, created, edited, typeId,
/// categories: [{ id }] }`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: DbId,
    pub name: String,
    pub content: String,
    pub created: Timestamp,
    pub edited: Timestamp,
    pub type_id: DbId,
    /// Sorted ascending.
    #[serde(rename = "categories", serialize_with = "serialize_category_refs")]
    pub category_ids: Vec<DbId>,
}

/// `{ "id": n }` projection of a category attached to a record.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CategoryRef {
    pub id: DbId,
}

fn serialize_category_refs<S>(ids: &[DbId], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(ids.iter().map(|&id| CategoryRef { id }))
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Body of `POST /record` and `PUT /record/{id}`.
///
/// On create, a missing or empty `content` stores the placeholder text. On
/// update, a missing `content` leaves the stored value untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    pub name: String,
    #[serde(default)]
    pub content: Option<String>,
    pub type_id: DbId,
    /// Replaces the full category set.
    pub categories_id: Vec<DbId>,
}
