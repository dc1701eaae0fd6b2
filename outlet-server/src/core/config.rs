//! Server Configuration

use crate::utils::AppError;

const DEFAULT_MODEL: &str = "meta-llama/Llama-2-70b-hf";
const DEFAULT_COMPLETION_URL: &str = "https://api.together.xyz";
const DEFAULT_STOREFINDER_URL: &str = "https://www.mcdonalds.com.my/storefinder/index.php";

/// 服务器配置 - 门店地图后端的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | data/stores.db | SQLite 数据库文件 |
/// | TOGETHER_API_KEY | (必填) | completion 凭证，缺失则启动失败 |
/// | TOGETHER_MODEL | meta-llama/Llama-2-70b-hf | completion 模型 |
/// | TOGETHER_API_URL | https://api.together.xyz | completion 端点 |
/// | GOOGLE_API_KEY | (无) | 地理编码密钥，缺失时禁用回填 |
/// | STOREFINDER_URL | 官网 storefinder | 门店抓取端点 |
///
/// # 示例
///
/// ```ignore
/// TOGETHER_API_KEY=xxx HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库路径
    pub database_path: String,
    /// Together.AI API 凭证 (启动时必须就绪)
    pub together_api_key: String,
    /// completion 模型名
    pub together_model: String,
    /// completion 端点基址
    pub together_api_url: String,
    /// Google Maps 地理编码密钥 (可选)
    pub google_api_key: Option<String>,
    /// 官网 storefinder 抓取端点
    pub storefinder_url: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 除 TOGETHER_API_KEY 外的配置项缺失时使用默认值；completion 凭证
    /// 缺失是唯一的致命启动错误。
    pub fn from_env() -> Result<Self, AppError> {
        let together_api_key = std::env::var("TOGETHER_API_KEY")
            .map_err(|_| AppError::internal("TOGETHER_API_KEY not configured"))?;

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/stores.db".into()),
            together_api_key,
            together_model: std::env::var("TOGETHER_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.into()),
            together_api_url: std::env::var("TOGETHER_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.into()),
            google_api_key: std::env::var("GOOGLE_API_KEY").ok(),
            storefinder_url: std::env::var("STOREFINDER_URL")
                .unwrap_or_else(|_| DEFAULT_STOREFINDER_URL.into()),
        })
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(
        database_path: impl Into<String>,
        http_port: u16,
        together_api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_port,
            database_path: database_path.into(),
            together_api_key: together_api_key.into(),
            together_model: DEFAULT_MODEL.into(),
            together_api_url: DEFAULT_COMPLETION_URL.into(),
            google_api_key: None,
            storefinder_url: DEFAULT_STOREFINDER_URL.into(),
        }
    }
}
