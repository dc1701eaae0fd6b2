//! Services Module
//!
//! 外部协作方客户端:
//! - [`completion`] - Together.AI 文本补全
//! - [`geocode`] - Google Maps 地理编码
//! - [`storefinder`] - 官网门店接口抓取

pub mod completion;
pub mod geocode;
pub mod storefinder;

pub use completion::{
    CompletionBackend, CompletionChoice, CompletionError, CompletionParams, CompletionResponse,
    TogetherClient,
};
pub use geocode::GeocodeService;
pub use storefinder::{StoreFinderService, SyncReport};
