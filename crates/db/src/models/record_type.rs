use records_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecordType {
    pub id: DbId,
    pub name: String,
}
