//! Integration tests for the record repository.
//!
//! Types (1, 2, 5) and categories (1, 2, 3) are seeded by the `taxonomy`
//! fixture; records are created through the repository.

use records_core::record_filter::{RecordFilter, RecordFilterParams};
use records_core::types::DbId;
use records_db::models::record::{Record, RecordPayload};
use records_db::repositories::{CategoryRepo, RecordRepo, TypeRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn payload(
    name: &str,
    content: Option<&str>,
    type_id: DbId,
    categories: &[DbId],
) -> RecordPayload {
    RecordPayload {
        name: name.to_string(),
        content: content.map(str::to_string),
        type_id,
        categories_id: categories.to_vec(),
    }
}

async fn list(pool: &PgPool, params: RecordFilterParams) -> Vec<Record> {
    let predicate = RecordFilter::from_params(&params).unwrap().predicate();
    RecordRepo::list(pool, &predicate).await.unwrap()
}

fn names(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

/// Three records spanning every type and category combination the listing
/// tests need.
async fn seed_records(pool: &PgPool) -> (Record, Record, Record) {
    let groceries = RecordRepo::create(
        pool,
        &payload("Groceries", Some("buy milk and foo bars"), 1, &[2]),
    )
    .await
    .unwrap();
    let report = RecordRepo::create(pool, &payload("Quarterly report", None, 2, &[1, 3]))
        .await
        .unwrap();
    let foo_trip = RecordRepo::create(pool, &payload("Foo trip", Some("Lisbon"), 5, &[]))
        .await
        .unwrap();
    (groceries, report, foo_trip)
}

// ---------------------------------------------------------------------------
// Test: read-only taxonomy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_types_and_categories(pool: PgPool) {
    let types = TypeRepo::list(&pool).await.unwrap();
    let type_ids: Vec<DbId> = types.iter().map(|t| t.id).collect();
    assert_eq!(type_ids, vec![1, 2, 5]);
    assert_eq!(types[0].name, "Note");

    let categories = CategoryRepo::list(&pool).await.unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[2].name, "Travel");
}

// ---------------------------------------------------------------------------
// Test: create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_create_without_content_uses_placeholder(pool: PgPool) {
    let created = RecordRepo::create(&pool, &payload("A", None, 5, &[1, 2]))
        .await
        .unwrap();

    let fetched = RecordRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("created record should be retrievable");
    assert_eq!(fetched.name, "A");
    assert_eq!(fetched.content, "Nothing here yet!");
    assert_eq!(fetched.type_id, 5);
    assert_eq!(fetched.category_ids, vec![1, 2]);
    assert_eq!(fetched.created, fetched.edited);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_create_with_empty_content_uses_placeholder(pool: PgPool) {
    let created = RecordRepo::create(&pool, &payload("A", Some(""), 1, &[]))
        .await
        .unwrap();
    assert_eq!(created.content, "Nothing here yet!");
    assert!(created.category_ids.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_create_keeps_supplied_content_and_dedups_categories(pool: PgPool) {
    let created = RecordRepo::create(&pool, &payload("A", Some("body"), 1, &[3, 1, 3]))
        .await
        .unwrap();
    assert_eq!(created.content, "body");
    assert_eq!(created.category_ids, vec![1, 3]);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_create_with_unknown_type_fails_and_writes_nothing(pool: PgPool) {
    let result = RecordRepo::create(&pool, &payload("A", None, 999, &[1])).await;
    assert!(matches!(result, Err(sqlx::Error::Database(_))));

    let all = list(&pool, RecordFilterParams::default()).await;
    assert!(all.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_create_with_unknown_category_rolls_back(pool: PgPool) {
    let result = RecordRepo::create(&pool, &payload("A", None, 1, &[1, 42])).await;
    assert!(matches!(result, Err(sqlx::Error::Database(_))));

    let all = list(&pool, RecordFilterParams::default()).await;
    assert!(all.is_empty(), "the record row must not survive the failed link");
}

// ---------------------------------------------------------------------------
// Test: update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_update_replaces_fields_and_categories(pool: PgPool) {
    let original = RecordRepo::create(&pool, &payload("Old", Some("old body"), 1, &[1, 2]))
        .await
        .unwrap();

    let updated = RecordRepo::update(
        &pool,
        original.id,
        &payload("New", Some("new body"), 2, &[3]),
    )
    .await
    .unwrap()
    .expect("record exists");

    assert_eq!(updated.name, "New");
    assert_eq!(updated.content, "new body");
    assert_eq!(updated.type_id, 2);
    assert_eq!(updated.category_ids, vec![3]);
    assert_eq!(updated.created, original.created);
    assert!(updated.edited > original.edited);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_update_with_empty_categories_clears_the_set(pool: PgPool) {
    let original = RecordRepo::create(&pool, &payload("A", None, 1, &[1, 2, 3]))
        .await
        .unwrap();

    let updated = RecordRepo::update(&pool, original.id, &payload("A", Some("x"), 1, &[]))
        .await
        .unwrap()
        .unwrap();
    assert!(updated.category_ids.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_update_without_content_keeps_stored_content(pool: PgPool) {
    let original = RecordRepo::create(&pool, &payload("A", Some("keep me"), 1, &[]))
        .await
        .unwrap();

    let updated = RecordRepo::update(&pool, original.id, &payload("B", None, 1, &[]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "B");
    assert_eq!(updated.content, "keep me");
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_repeated_updates_strictly_advance_edited(pool: PgPool) {
    let record = RecordRepo::create(&pool, &payload("A", None, 1, &[]))
        .await
        .unwrap();

    let mut previous = record.edited;
    for _ in 0..5 {
        let updated = RecordRepo::update(&pool, record.id, &payload("A", None, 1, &[]))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.edited > previous);
        previous = updated.edited;
    }
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_update_missing_record_returns_none(pool: PgPool) {
    let result = RecordRepo::update(&pool, 12345, &payload("A", None, 1, &[1]))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_update_with_unknown_type_keeps_previous_state(pool: PgPool) {
    let original = RecordRepo::create(&pool, &payload("A", None, 1, &[1]))
        .await
        .unwrap();

    let result = RecordRepo::update(&pool, original.id, &payload("B", None, 999, &[])).await;
    assert!(matches!(result, Err(sqlx::Error::Database(_))));

    let fetched = RecordRepo::find_by_id(&pool, original.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.name, "A");
    assert_eq!(fetched.category_ids, vec![1]);
}

// ---------------------------------------------------------------------------
// Test: delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_delete_then_find_returns_none(pool: PgPool) {
    let record = RecordRepo::create(&pool, &payload("A", None, 1, &[1, 2]))
        .await
        .unwrap();

    assert!(RecordRepo::delete(&pool, record.id).await.unwrap());
    assert!(RecordRepo::find_by_id(&pool, record.id)
        .await
        .unwrap()
        .is_none());

    // Second delete finds nothing to remove.
    assert!(!RecordRepo::delete(&pool, record.id).await.unwrap());

    let links: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM record_categories WHERE record_id = $1")
            .bind(record.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(links, 0, "category links cascade with the record");
}

// ---------------------------------------------------------------------------
// Test: filtered listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_without_filters_returns_everything(pool: PgPool) {
    seed_records(&pool).await;

    let all = list(&pool, RecordFilterParams::default()).await;
    assert_eq!(names(&all), vec!["Groceries", "Quarterly report", "Foo trip"]);
    assert_eq!(all[0].category_ids, vec![2]);
    assert_eq!(all[1].category_ids, vec![1, 3]);
    assert!(all[2].category_ids.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_by_any_category(pool: PgPool) {
    seed_records(&pool).await;

    let matched = list(
        &pool,
        RecordFilterParams {
            category: Some("1,2".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&matched), vec!["Groceries", "Quarterly report"]);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_by_type(pool: PgPool) {
    seed_records(&pool).await;

    let matched = list(
        &pool,
        RecordFilterParams {
            record_type: Some("2,5".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&matched), vec!["Quarterly report", "Foo trip"]);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_contains_matches_name_or_content(pool: PgPool) {
    seed_records(&pool).await;

    let matched = list(
        &pool,
        RecordFilterParams {
            contains: Some("foo".into()),
            ..Default::default()
        },
    )
    .await;
    // "Foo trip" differs in case, so only the content match survives.
    assert_eq!(names(&matched), vec!["Groceries"]);

    let matched = list(
        &pool,
        RecordFilterParams {
            contains: Some("Foo".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&matched), vec!["Foo trip"]);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_contains_treats_wildcards_literally(pool: PgPool) {
    seed_records(&pool).await;
    RecordRepo::create(&pool, &payload("50% off", None, 1, &[]))
        .await
        .unwrap();

    let matched = list(
        &pool,
        RecordFilterParams {
            contains: Some("%".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&matched), vec!["50% off"]);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_combines_conditions_with_and(pool: PgPool) {
    seed_records(&pool).await;

    let matched = list(
        &pool,
        RecordFilterParams {
            category: Some("1,2".into()),
            record_type: Some("1".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&matched), vec!["Groceries"]);
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_invalid_id_segments_match_nothing(pool: PgPool) {
    seed_records(&pool).await;

    let matched = list(
        &pool,
        RecordFilterParams {
            category: Some("2,abc".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&matched), vec!["Groceries"]);

    let matched = list(
        &pool,
        RecordFilterParams {
            record_type: Some("abc".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matched.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations", fixtures("taxonomy"))]
async fn test_list_by_date_bounds(pool: PgPool) {
    let (groceries, report, _) = seed_records(&pool).await;

    sqlx::query(
        "UPDATE records SET created = '2020-01-15T00:00:00Z', edited = '2020-02-01T00:00:00Z' \
         WHERE id = $1",
    )
        .bind(groceries.id)
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "UPDATE records SET created = '2021-06-01T00:00:00Z', edited = '2021-06-01T00:00:00Z' \
         WHERE id = $1",
    )
        .bind(report.id)
        .execute(&pool)
        .await
        .unwrap();

    let created_in_2020 = list(
        &pool,
        RecordFilterParams {
            created_from: Some("2020-01-01".into()),
            created_to: Some("2020-12-31".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&created_in_2020), vec!["Groceries"]);

    let edited_since_2021 = list(
        &pool,
        RecordFilterParams {
            edited_from: Some("2021-01-01T00:00:00Z".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&edited_since_2021), vec!["Quarterly report", "Foo trip"]);

    let bound_is_inclusive = list(
        &pool,
        RecordFilterParams {
            edited_to: Some("2020-02-01".into()),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(names(&bound_is_inclusive), vec!["Groceries"]);
}
