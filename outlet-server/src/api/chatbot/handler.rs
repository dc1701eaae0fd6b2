//! Chatbot API Handlers

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use crate::api::convert::{FormattedStore, format_store};
use crate::chatbot::{self, Translator, front_door};
use crate::core::ServerState;
use crate::db::repository::store;
use crate::utils::{AppError, AppResult};

/// Minimum length for a chatbot question.
const MIN_QUERY_LEN: usize = 3;

const TRANSLATION_FAILED_REPLY: &str = "I'm sorry, I encountered an issue processing your \
     request. Please try again with a different question.";
const NO_MATCHES_REPLY: &str = "I couldn't find any matching McDonald's locations. Try a \
     different location or ask about specific features.";

#[derive(Debug, Deserialize)]
pub struct ChatbotQuery {
    query: String,
}

/// Chatbot response. `query` and `sql_query` are present only when a
/// translation succeeded; handled failures keep `matches` at zero with an
/// empty data payload.
#[derive(Debug, Serialize)]
pub struct ChatbotResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_query: Option<String>,
    pub matches: usize,
    pub data: Vec<FormattedStore>,
}

impl ChatbotResponse {
    /// Zero-result reply used for every handled failure path.
    fn fallback(response: impl Into<String>) -> Self {
        Self {
            query: None,
            response: response.into(),
            sql_query: None,
            matches: 0,
            data: Vec::new(),
        }
    }
}

/// GET /api/chatbot - 自然语言查询门店
pub async fn query(
    State(state): State<ServerState>,
    Query(params): Query<ChatbotQuery>,
) -> AppResult<Json<ChatbotResponse>> {
    let question = params.query.trim();
    if question.len() < MIN_QUERY_LEN {
        return Err(AppError::validation(format!(
            "query must be at least {MIN_QUERY_LEN} characters"
        )));
    }

    Ok(Json(respond(&state, question).await))
}

/// 管线: 会话前置拦截 → 翻译 (特例/LLM) → 只读查询 → 格式化。
/// 所有已处理的失败都返回零结果文案，不向调用方暴露底层错误。
pub async fn respond(state: &ServerState, question: &str) -> ChatbotResponse {
    // 1. Conversational front-door (gratitude/greeting/farewell)
    if let Some(reply) = front_door::classify(question) {
        return ChatbotResponse::fallback(reply.response);
    }

    // 2. Translate into a read-only filter
    let translator = Translator::new(state.completion.clone());
    let translated = match translator.translate(question).await {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(question, error = %e, "Query translation failed");
            return ChatbotResponse::fallback(TRANSLATION_FAILED_REPLY);
        }
    };

    // 3. Execute; the repository re-checks the read-only contract
    let stores = match store::query_filter(&state.pool, &translated.sql).await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(sql = %translated.sql, error = %e, "Filter query failed");
            return ChatbotResponse::fallback(NO_MATCHES_REPLY);
        }
    };

    if stores.is_empty() {
        return ChatbotResponse::fallback(NO_MATCHES_REPLY);
    }

    let data: Vec<FormattedStore> = stores.iter().map(format_store).collect();
    let response = chatbot::summarize_matches(question, data.len());

    ChatbotResponse {
        query: Some(question.to_string()),
        response,
        sql_query: Some(translated.sql),
        matches: data.len(),
        data,
    }
}
