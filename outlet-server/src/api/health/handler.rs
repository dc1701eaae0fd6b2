//! Health API Handlers

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Welcome {
    message: &'static str,
}

/// GET / - 服务横幅
pub async fn root() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to McDonald's Outlet Map API",
    })
}

#[derive(Serialize)]
pub struct Health {
    status: &'static str,
}

/// GET /api/health - 健康检查
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
