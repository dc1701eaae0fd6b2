//! Outlet Map Server - 门店地图后端
//!
//! # 架构概述
//!
//! 本模块是门店地图后端的主入口，提供以下核心功能:
//!
//! - **数据库** (`db`): SQLite 门店表 (sqlx, WAL)
//! - **聊天机器人** (`chatbot`): 自然语言到只读 SQL 的翻译管线
//! - **外部服务** (`services`): Together.AI completion、Google 地理编码、
//!   官网 storefinder 抓取
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! outlet-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 连接池与仓储
//! ├── chatbot/       # 前置拦截与查询翻译
//! ├── services/      # 外部协作方客户端
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误与日志
//! ```

pub mod api;
pub mod chatbot;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

pub fn print_banner() {
    println!(
        r#"
   ____        __  __     __     __  ___
  / __ \__  __/ /_/ /__  / /_   /  |/  /___ _____
 / / / / / / / __/ / _ \/ __/  / /|_/ / __ `/ __ \
/ /_/ / /_/ / /_/ /  __/ /_   / /  / / /_/ / /_/ /
\____/\__,_/\__/_/\___/\__/  /_/  /_/\__,_/ .___/
                                         /_/
    "#
    );
}
