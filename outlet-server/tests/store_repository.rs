//! Store repository behavior: duplicate-skip ingest, read-only guard and
//! coordinate back-fill, against both a real database file and in-memory
//! pools.
//! Run: cargo test -p outlet-server --test store_repository

use outlet_server::db::DbService;
use outlet_server::db::repository::{RepoError, store};
use shared::models::StoreCreate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

fn outlet(name: &str, address: &str) -> StoreCreate {
    StoreCreate {
        name: name.to_string(),
        address: address.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn database_file_initializes_with_migrations() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp.path().join("nested").join("stores.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("database initializes");

    assert!(db_path.exists());
    assert!(store::find_all(&db.pool).await.expect("find_all").is_empty());
}

#[tokio::test]
async fn duplicate_scrapes_are_skipped_not_overwritten() {
    let pool = test_pool().await;

    let mut first = outlet("McDonald's Bukit Bintang", "Jalan Bukit Bintang, Kuala Lumpur");
    first.telephone = Some("03-2110 1234".to_string());
    assert!(
        store::insert_skip_duplicates(&pool, &first)
            .await
            .expect("insert")
    );

    // Same (name, address) with different details must be skipped
    first.telephone = Some("09-9999 9999".to_string());
    assert!(
        !store::insert_skip_duplicates(&pool, &first)
            .await
            .expect("insert")
    );

    let all = store::find_all(&pool).await.expect("find_all");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].telephone.as_deref(), Some("03-2110 1234"));
}

#[tokio::test]
async fn same_name_at_a_different_address_is_a_new_outlet() {
    let pool = test_pool().await;
    assert!(
        store::insert_skip_duplicates(&pool, &outlet("McDonald's", "Jalan A, Kuala Lumpur"))
            .await
            .expect("insert")
    );
    assert!(
        store::insert_skip_duplicates(&pool, &outlet("McDonald's", "Jalan B, Kuala Lumpur"))
            .await
            .expect("insert")
    );
    assert_eq!(store::find_all(&pool).await.expect("find_all").len(), 2);
}

#[tokio::test]
async fn non_select_filters_are_rejected_without_executing() {
    let pool = test_pool().await;
    store::insert_skip_duplicates(&pool, &outlet("McDonald's Cheras", "Cheras, Kuala Lumpur"))
        .await
        .expect("insert");

    let err = store::query_filter(&pool, "DROP TABLE stores")
        .await
        .expect_err("must be rejected");
    assert!(matches!(err, RepoError::ReadOnly(_)));

    // The table is still there with its row
    assert_eq!(store::find_all(&pool).await.expect("find_all").len(), 1);
}

#[tokio::test]
async fn filter_queries_match_on_like_patterns() {
    let pool = test_pool().await;
    let mut bb = outlet("McDonald's Bukit Bintang", "Jalan Bukit Bintang, Kuala Lumpur");
    bb.operating_hours = Some("24 Hours".to_string());
    store::insert_skip_duplicates(&pool, &bb).await.expect("insert");
    store::insert_skip_duplicates(&pool, &outlet("McDonald's Penang", "Georgetown, Penang"))
        .await
        .expect("insert");

    let rows = store::query_filter(
        &pool,
        "SELECT * FROM stores WHERE operating_hours LIKE '%24%' AND address LIKE '%kuala lumpur%'",
    )
    .await
    .expect("filter");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "McDonald's Bukit Bintang");
}

#[tokio::test]
async fn unknown_columns_surface_as_query_errors() {
    let pool = test_pool().await;
    let err = store::query_filter(&pool, "SELECT * FROM stores WHERE no_such_column = 1")
        .await
        .expect_err("must fail");
    assert!(matches!(err, RepoError::Query(_)));
}

#[tokio::test]
async fn coordinate_back_fill_persists() {
    let pool = test_pool().await;
    store::insert_skip_duplicates(&pool, &outlet("McDonald's Cheras", "Cheras, Kuala Lumpur"))
        .await
        .expect("insert");

    let all = store::find_all(&pool).await.expect("find_all");
    assert_eq!(all[0].lat, None);

    store::update_coordinates(&pool, all[0].id, 3.1064, 101.7371)
        .await
        .expect("update");

    let all = store::find_all(&pool).await.expect("find_all");
    assert_eq!(all[0].lat, Some(3.1064));
    assert_eq!(all[0].lng, Some(101.7371));
}
