//! End-to-end chatbot pipeline: stubbed completion backend + in-memory
//! database, exercising the front door, both translation paths and the
//! fallback replies.
//! Run: cargo test -p outlet-server --test chatbot_flow

use std::sync::Arc;

use async_trait::async_trait;
use outlet_server::api::chatbot;
use outlet_server::db::repository::store;
use outlet_server::services::{
    CompletionBackend, CompletionChoice, CompletionError, CompletionParams, CompletionResponse,
};
use outlet_server::{Config, ServerState};
use shared::models::StoreCreate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// Stub backend returning a fixed completion envelope. `None` produces an
/// empty choices array (malformed envelope).
struct FixedCompletion {
    text: Option<&'static str>,
}

#[async_trait]
impl CompletionBackend for FixedCompletion {
    async fn complete(
        &self,
        _prompt: &str,
        _params: &CompletionParams,
    ) -> Result<CompletionResponse, CompletionError> {
        Ok(CompletionResponse {
            choices: self
                .text
                .iter()
                .map(|t| CompletionChoice {
                    text: (*t).to_string(),
                })
                .collect(),
        })
    }
}

/// Stub that fails the test if the model path is ever taken.
struct PanickingCompletion;

#[async_trait]
impl CompletionBackend for PanickingCompletion {
    async fn complete(
        &self,
        _prompt: &str,
        _params: &CompletionParams,
    ) -> Result<CompletionResponse, CompletionError> {
        panic!("completion must not be called for this question");
    }
}

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

fn state_with(pool: SqlitePool, completion: impl CompletionBackend + 'static) -> ServerState {
    let config = Config::with_overrides(":memory:", 0, "test-key");
    ServerState::with_backend(config, pool, Arc::new(completion))
}

fn outlet(name: &str, address: &str, hours: Option<&str>) -> StoreCreate {
    StoreCreate {
        name: name.to_string(),
        address: address.to_string(),
        operating_hours: hours.map(str::to_string),
        ..Default::default()
    }
}

#[tokio::test]
async fn kl_24_hours_special_case_bypasses_the_model() {
    let pool = test_pool().await;
    store::insert_skip_duplicates(
        &pool,
        &outlet(
            "McDonald's Bukit Bintang",
            "Jalan Bukit Bintang, Kuala Lumpur",
            Some("24 Hours"),
        ),
    )
    .await
    .expect("insert");
    // Airport branch: matches the address cue but is excluded by name
    store::insert_skip_duplicates(
        &pool,
        &outlet("McDonald's KLIA Airport", "KLIA, 64000 Sepang", Some("24 Hours")),
    )
    .await
    .expect("insert");
    store::insert_skip_duplicates(
        &pool,
        &outlet(
            "McDonald's Mid Valley",
            "Mid Valley Megamall, Kuala Lumpur",
            Some("8am - 11pm"),
        ),
    )
    .await
    .expect("insert");

    // A backend that would fail validation proves the special case never
    // reaches the model.
    let state = state_with(
        pool,
        FixedCompletion {
            text: Some("DROP TABLE stores"),
        },
    );

    let reply = chatbot::respond(&state, "Which outlets in KL operate 24 hours?").await;
    assert_eq!(reply.matches, 1);
    assert_eq!(reply.data[0].name, "McDonald's Bukit Bintang");
    assert!(
        reply
            .sql_query
            .as_deref()
            .expect("sql present on success")
            .starts_with("SELECT")
    );
    assert_eq!(
        reply.response,
        "Found 1 24-hour McDonald's locations in Kuala Lumpur:"
    );
}

#[tokio::test]
async fn birthday_party_special_case_filters_on_the_flag() {
    let pool = test_pool().await;
    let mut party = outlet("McDonald's Sri Petaling", "Sri Petaling, Kuala Lumpur", None);
    party.has_birthday_party = 1;
    store::insert_skip_duplicates(&pool, &party).await.expect("insert");
    store::insert_skip_duplicates(
        &pool,
        &outlet("McDonald's Cheras", "Cheras, Kuala Lumpur", None),
    )
    .await
    .expect("insert");

    let state = state_with(pool, PanickingCompletion);
    let reply = chatbot::respond(&state, "Which outlet allows birthday parties").await;
    assert_eq!(reply.matches, 1);
    assert_eq!(reply.data[0].name, "McDonald's Sri Petaling");
    assert!(reply.data[0].features.birthday_party);
}

#[tokio::test]
async fn model_path_executes_the_generated_select() {
    let pool = test_pool().await;
    let mut wifi = outlet("McDonald's KL Sentral", "KL Sentral, Kuala Lumpur", None);
    wifi.has_wifi = 1;
    store::insert_skip_duplicates(&pool, &wifi).await.expect("insert");
    store::insert_skip_duplicates(&pool, &outlet("McDonald's Putrajaya", "Putrajaya", None))
        .await
        .expect("insert");

    let state = state_with(
        pool,
        FixedCompletion {
            text: Some("SELECT * FROM stores WHERE has_wifi = 1;"),
        },
    );

    let reply = chatbot::respond(&state, "Find outlets with wifi").await;
    assert_eq!(reply.matches, 1);
    assert!(reply.data[0].features.wifi);
    assert_eq!(reply.query.as_deref(), Some("Find outlets with wifi"));
}

#[tokio::test]
async fn gratitude_short_circuits_before_translation() {
    let state = state_with(test_pool().await, PanickingCompletion);

    let reply = chatbot::respond(&state, "thanks").await;
    assert_eq!(reply.matches, 0);
    assert!(reply.data.is_empty());
    assert!(reply.response.starts_with("You're welcome"));
    assert_eq!(reply.query, None);
    assert_eq!(reply.sql_query, None);
}

#[tokio::test]
async fn empty_completion_yields_the_apology_reply() {
    let state = state_with(test_pool().await, FixedCompletion { text: Some("") });

    let reply = chatbot::respond(&state, "Find outlets near Penang").await;
    assert_eq!(reply.matches, 0);
    assert!(reply.data.is_empty());
    assert!(reply.response.starts_with("I'm sorry"));
    assert_eq!(reply.sql_query, None);
}

#[tokio::test]
async fn missing_choices_yield_the_apology_reply() {
    let state = state_with(test_pool().await, FixedCompletion { text: None });

    let reply = chatbot::respond(&state, "List stores in Ampang").await;
    assert_eq!(reply.matches, 0);
    assert!(reply.response.starts_with("I'm sorry"));
}

#[tokio::test]
async fn destructive_completion_never_reaches_the_database() {
    let pool = test_pool().await;
    store::insert_skip_duplicates(
        &pool,
        &outlet("McDonald's Cheras", "Cheras, Kuala Lumpur", None),
    )
    .await
    .expect("insert");

    let state = state_with(
        pool.clone(),
        FixedCompletion {
            text: Some("DROP TABLE stores"),
        },
    );

    let reply = chatbot::respond(&state, "List all stores please").await;
    assert!(reply.response.starts_with("I'm sorry"));

    // Table untouched
    assert_eq!(store::find_all(&pool).await.expect("find_all").len(), 1);
}

#[tokio::test]
async fn zero_matches_yield_the_not_found_reply() {
    let state = state_with(
        test_pool().await,
        FixedCompletion {
            text: Some("SELECT * FROM stores WHERE has_mccafe = 1"),
        },
    );

    let reply = chatbot::respond(&state, "Find stores with mccafe").await;
    assert_eq!(reply.matches, 0);
    assert!(reply.response.starts_with("I couldn't find"));
}

#[tokio::test]
async fn broken_select_is_handled_as_zero_matches() {
    let state = state_with(
        test_pool().await,
        FixedCompletion {
            text: Some("SELECT nope FROM missing_table"),
        },
    );

    let reply = chatbot::respond(&state, "Find stores somewhere").await;
    assert_eq!(reply.matches, 0);
    assert!(reply.response.starts_with("I couldn't find"));
}
