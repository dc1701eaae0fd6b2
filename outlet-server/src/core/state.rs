//! Server State

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{CompletionBackend, GeocodeService, TogetherClient};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 通过 Clone 在 axum handler 间浅拷贝共享 (池和 completion 后端都是
/// 引用计数的)。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | completion | completion 后端 (测试中可替换为 stub) |
/// | geocoder | 地理编码服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// Completion 后端
    pub completion: Arc<dyn CompletionBackend>,
    /// 地理编码服务
    pub geocoder: GeocodeService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化:
    /// 1. 数据库 (连接池 + 迁移)
    /// 2. Completion 客户端 (Together.AI)
    /// 3. 地理编码服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;

        let completion: Arc<dyn CompletionBackend> = Arc::new(TogetherClient::new(
            config.together_api_url.clone(),
            config.together_api_key.clone(),
            config.together_model.clone(),
        ));

        let geocoder = GeocodeService::new(config.google_api_key.clone());

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            completion,
            geocoder,
        })
    }

    /// 以指定的池和 completion 后端构造状态 (测试用)
    pub fn with_backend(
        config: Config,
        pool: SqlitePool,
        completion: Arc<dyn CompletionBackend>,
    ) -> Self {
        let geocoder = GeocodeService::new(config.google_api_key.clone());
        Self {
            config,
            pool,
            completion,
            geocoder,
        }
    }
}
