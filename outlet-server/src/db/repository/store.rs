//! Store Repository
//!
//! 门店表的只读查询与采集写入。聊天路径只会经过 [`query_filter`]，
//! 它对传入的 SQL 再做一次只读校验。

use super::{RepoError, RepoResult};
use shared::models::{Store, StoreCreate};
use sqlx::SqlitePool;

const SELECT_ALL: &str = "SELECT id, name, address, lat, lng, operating_hours, waze_link, \
     telephone, email, has_birthday_party, has_breakfast, has_cashless, has_dessert_center, \
     has_digital_kiosk, has_mccafe, has_wifi, has_mcdelivery FROM stores";

/// Reject any statement that is not a SELECT, without executing it.
///
/// The filter text may originate from an untrusted model completion, so
/// this check is independent of the translator's own validation.
pub fn ensure_read_only(sql: &str) -> RepoResult<()> {
    let head = sql.trim_start();
    let is_select = head
        .get(..6)
        .is_some_and(|kw| kw.eq_ignore_ascii_case("select"));
    if is_select {
        Ok(())
    } else {
        Err(RepoError::ReadOnly(
            "only SELECT statements may be executed".to_string(),
        ))
    }
}

/// Execute a filter query and map the rows back to stores.
///
/// Execution failures (bad syntax, unknown column) come back as
/// [`RepoError::Query`] carrying the driver message.
pub async fn query_filter(pool: &SqlitePool, sql: &str) -> RepoResult<Vec<Store>> {
    ensure_read_only(sql)?;

    sqlx::query_as::<_, Store>(sql)
        .fetch_all(pool)
        .await
        .map_err(|e| RepoError::Query(e.to_string()))
}

/// Full-table projection of the documented columns.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Store>> {
    let stores = sqlx::query_as::<_, Store>(SELECT_ALL).fetch_all(pool).await?;
    Ok(stores)
}

/// Insert a scraped outlet, skipping duplicates on (name, address).
///
/// Returns true when a row was inserted, false when an identical outlet
/// already exists (existing rows are never overwritten).
pub async fn insert_skip_duplicates(pool: &SqlitePool, data: &StoreCreate) -> RepoResult<bool> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO stores (name, address, lat, lng, operating_hours, waze_link, \
         telephone, email, has_birthday_party, has_breakfast, has_cashless, has_dessert_center, \
         has_digital_kiosk, has_mccafe, has_wifi, has_mcdelivery) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.address)
    .bind(data.lat)
    .bind(data.lng)
    .bind(&data.operating_hours)
    .bind(&data.waze_link)
    .bind(&data.telephone)
    .bind(&data.email)
    .bind(data.has_birthday_party)
    .bind(data.has_breakfast)
    .bind(data.has_cashless)
    .bind(data.has_dessert_center)
    .bind(data.has_digital_kiosk)
    .bind(data.has_mccafe)
    .bind(data.has_wifi)
    .bind(data.has_mcdelivery)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Back-fill geocoded coordinates for one outlet.
pub async fn update_coordinates(
    pool: &SqlitePool,
    id: i64,
    lat: f64,
    lng: f64,
) -> RepoResult<()> {
    sqlx::query("UPDATE stores SET lat = ?, lng = ? WHERE id = ?")
        .bind(lat)
        .bind(lng)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
