//! Chatbot Domain
//!
//! 自然语言查询管线: 会话前置拦截 → 翻译 (特例规则 / LLM) → 只读查询。
//!
//! - [`front_door`] - 致谢/寒暄/道别的前置拦截
//! - [`translator`] - 自然语言到 SQL 的翻译

pub mod front_door;
pub mod translator;

pub use front_door::{ConversationalReply, classify};
pub use translator::{TranslatedQuery, TranslationError, Translator};

/// Response line for a successful query, phrased after the question intent.
pub fn summarize_matches(question: &str, count: usize) -> String {
    let q = question.to_lowercase();
    if q.contains("24 hour") || q.contains("24-hour") {
        if q.contains("kl") || q.contains("kuala lumpur") {
            format!("Found {count} 24-hour McDonald's locations in Kuala Lumpur:")
        } else {
            format!("Found {count} 24-hour McDonald's locations:")
        }
    } else if q.contains("birthday party") || q.contains("birthday parties") {
        format!("Found {count} McDonald's locations that allow birthday parties:")
    } else {
        format!("Found {count} McDonald's locations matching your query:")
    }
}
