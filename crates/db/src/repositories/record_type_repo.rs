//! Repository for the `types` table.

use sqlx::PgPool;

use crate::models::record_type::RecordType;

/// Read access to record types. The API never writes them.
pub struct TypeRepo;

impl TypeRepo {
    /// List all types, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<RecordType>, sqlx::Error> {
        sqlx::query_as::<_, RecordType>("SELECT id, name FROM types ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
