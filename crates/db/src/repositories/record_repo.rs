//! Repository for the `records` and `record_categories` tables.
//!
//! Provides filtered listing, lookup by id, and create/update/delete. Writes
//! that touch the category links run in a single transaction with the row
//! change.

use chrono::Utc;
use records_core::record::{content_or_placeholder, dedup_category_ids};
use records_core::record_filter::{Predicate, TextField, TimeField};
use records_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::models::record::{Record, RecordPayload};

/// Column list for record queries. The category ids are aggregated in the
/// same statement so a listing costs one round trip.
const COLUMNS: &str = "\
    r.id, r.name, r.content, r.created, r.edited, r.type_id, \
    ARRAY(SELECT rc.category_id FROM record_categories rc \
          WHERE rc.record_id = r.id ORDER BY rc.category_id) AS category_ids";

/// Provides CRUD operations for records and their category links.
pub struct RecordRepo;

impl RecordRepo {
    /// List records matching `predicate`, ordered by id.
    pub async fn list(pool: &PgPool, predicate: &Predicate) -> Result<Vec<Record>, sqlx::Error> {
        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM records r WHERE "));
        push_predicate(&mut query, predicate);
        query.push(" ORDER BY r.id");

        tracing::debug!(
            sql = query.sql(),
            unconstrained = predicate.is_unconstrained(),
            "Listing records"
        );

        query.build_query_as::<Record>().fetch_all(pool).await
    }

    /// Find a record by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Record>, sqlx::Error> {
        fetch_record(pool, id).await
    }

    /// Insert a record and connect its categories.
    ///
    /// `created` and `edited` are both set to the same instant. A `type_id`
    /// or category id that does not exist fails with a foreign key violation
    /// and nothing is written.
    pub async fn create(pool: &PgPool, input: &RecordPayload) -> Result<Record, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO records (name, content, created, edited, type_id) \
             VALUES ($1, $2, $3, $3, $4) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(content_or_placeholder(input.content.as_deref()))
        .bind(now)
        .bind(input.type_id)
        .fetch_one(&mut *tx)
        .await?;

        Self::connect_categories_inner(&mut tx, id, &input.categories_id).await?;

        let record = fetch_record(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        Ok(record)
    }

    /// Replace a record's name, content, type and category set.
    ///
    /// `content: None` keeps the stored content. `edited` always moves
    /// forward, even when two edits land within the same microsecond.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &RecordPayload,
    ) -> Result<Option<Record>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query_scalar::<_, DbId>(
            "UPDATE records SET \
                name = $2, \
                content = COALESCE($3, content), \
                type_id = $4, \
                edited = GREATEST($5, edited + INTERVAL '1 microsecond') \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.content.as_deref())
        .bind(input.type_id)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        sqlx::query("DELETE FROM record_categories WHERE record_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        Self::connect_categories_inner(&mut tx, id, &input.categories_id).await?;

        let record = fetch_record(&mut *tx, id).await?;

        tx.commit().await?;
        Ok(record)
    }

    /// Hard-delete a record. Category links cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Attach categories to a record within an existing transaction.
    /// Already-attached ids are skipped.
    async fn connect_categories_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        record_id: DbId,
        category_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let category_ids = dedup_category_ids(category_ids);
        if category_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO record_categories (record_id, category_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(record_id)
        .bind(&category_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn fetch_record<'c, E>(executor: E, id: DbId) -> Result<Option<Record>, sqlx::Error>
where
    E: PgExecutor<'c>,
{
    let query = format!("SELECT {COLUMNS} FROM records r WHERE r.id = $1");
    sqlx::query_as::<_, Record>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Append `predicate` as a boolean SQL expression. All values are bound.
fn push_predicate(query: &mut QueryBuilder<'_, Postgres>, predicate: &Predicate) {
    match predicate {
        Predicate::And(clauses) => push_junction(query, clauses, " AND ", "TRUE"),
        Predicate::Or(clauses) => push_junction(query, clauses, " OR ", "FALSE"),
        Predicate::Contains { field, value } => {
            query
                .push(text_column(*field))
                .push(" LIKE ")
                .push_bind(like_pattern(value));
        }
        Predicate::AtLeast { field, bound } => {
            query.push(time_column(*field)).push(" >= ").push_bind(*bound);
        }
        Predicate::AtMost { field, bound } => {
            query.push(time_column(*field)).push(" <= ").push_bind(*bound);
        }
        Predicate::TypeIn(ids) => {
            query.push("r.type_id = ANY(").push_bind(ids.clone()).push(")");
        }
        Predicate::AnyCategoryIn(ids) => {
            query
                .push(
                    "EXISTS (SELECT 1 FROM record_categories rc \
                     WHERE rc.record_id = r.id AND rc.category_id = ANY(",
                )
                .push_bind(ids.clone())
                .push("))");
        }
    }
}

/// Join `clauses` with `separator`; an empty list becomes `identity`.
fn push_junction(
    query: &mut QueryBuilder<'_, Postgres>,
    clauses: &[Predicate],
    separator: &str,
    identity: &str,
) {
    if clauses.is_empty() {
        query.push(identity);
        return;
    }
    query.push("(");
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            query.push(separator);
        }
        push_predicate(query, clause);
    }
    query.push(")");
}

fn text_column(field: TextField) -> &'static str {
    match field {
        TextField::Name => "r.name",
        TextField::Content => "r.content",
    }
}

fn time_column(field: TimeField) -> &'static str {
    match field {
        TimeField::Created => "r.created",
        TimeField::Edited => "r.edited",
    }
}

/// Wrap `needle` for a substring `LIKE`, escaping the wildcards it contains.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
