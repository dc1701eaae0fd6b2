//! Shared Models - 门店地图全栈共享的数据模型
//!
//! serde 序列化; `db` feature 额外派生 `sqlx::FromRow`。

pub mod models;

// Re-export 公共类型
pub use models::{Store, StoreCreate};
