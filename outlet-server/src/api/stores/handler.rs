//! Store API Handlers

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::api::convert::{FormattedStore, format_store};
use crate::core::ServerState;
use crate::db::repository::store;
use crate::services::{StoreFinderService, SyncReport};
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct StoreList {
    pub stores: Vec<FormattedStore>,
}

/// GET /api/stores - 获取全部门店
///
/// 缺坐标的记录在读取时逐条同步地理编码并回写数据库。
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<StoreList>> {
    let mut records = store::find_all(&state.pool).await?;

    for record in &mut records {
        if record.lat.is_some() && record.lng.is_some() {
            continue;
        }
        if let Some((lat, lng)) = state.geocoder.lookup(&record.address).await {
            record.lat = Some(lat);
            record.lng = Some(lng);
            if let Err(e) = store::update_coordinates(&state.pool, record.id, lat, lng).await {
                tracing::warn!(id = record.id, error = %e, "Failed to persist geocoded coordinates");
            }
        }
    }

    let stores = records.iter().map(format_store).collect();
    Ok(Json(StoreList { stores }))
}

/// POST /api/stores/sync - 抓取 storefinder 并入库
pub async fn sync(State(state): State<ServerState>) -> AppResult<Json<SyncReport>> {
    let finder = StoreFinderService::new(state.config.storefinder_url.clone());
    let report = finder.sync(&state.pool).await?;
    Ok(Json(report))
}
