//! Repository for the `categories` table.

use sqlx::PgPool;

use crate::models::category::Category;

/// Read access to categories. The API never writes them.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
