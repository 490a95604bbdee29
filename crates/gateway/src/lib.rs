//! HTTP API gateway for frontdesk.
//!
//! Exposes the answer engine over REST: a health check and the `/ask`
//! endpoint. Built on Axum.
//!
//! Error surface (matching the service contract):
//! - empty/whitespace query → 400 with an error message
//! - internal failure → 500 carrying the failure description
//! - success → 200 with the normalized answer

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use frontdesk_config::AppConfig;
use frontdesk_core::error::Error;
use frontdesk_engine::AnswerEngine;
use frontdesk_history::HistoryStore;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub engine: Arc<AnswerEngine>,
    pub history: Arc<HistoryStore>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ask", post(ask_handler))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Builds the embedder, index, adapters, engine, and history store once
/// at startup; requests share them read-only (the history store serializes
/// its own writes).
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let embedder = frontdesk_knowledge::default_embedder();
    let index = frontdesk_knowledge::load_index(&config.knowledge.path, embedder)?;
    let adapters = frontdesk_providers::build_adapters(&config);
    let engine = Arc::new(
        AnswerEngine::new(index, adapters.primary, adapters.secondary, adapters.general)
            .with_top_k(config.knowledge.top_k),
    );
    let history = Arc::new(HistoryStore::new(config.history.path.clone()));

    let state = Arc::new(GatewayState { engine, history });
    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Deserialize)]
struct AskRequest {
    query: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn ask_handler(
    State(state): State<SharedState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, Json<ErrorResponse>)> {
    let query = payload.query.trim().to_string();
    if query.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Query cannot be empty".into(),
            }),
        ));
    }

    let answer = match state.engine.answer(&query).await {
        Ok(answer) => answer,
        Err(Error::EmptyQuery) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Query cannot be empty".into(),
                }),
            ));
        }
        Err(e) => {
            error!(error = %e, "Query processing failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Error processing query: {e}"),
                }),
            ));
        }
    };

    if let Err(e) = state.history.record(&query, &answer).await {
        error!(error = %e, "Failed to record exchange");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Error processing query: {e}"),
            }),
        ));
    }

    Ok(Json(AskResponse { answer }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use frontdesk_engine::{APOLOGY_REPLY, SCHOOL_ADDRESS_REPLY};
    use frontdesk_knowledge::{EmbeddingIndex, HashEmbedder};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// State backed by a tiny corpus and unconfigured adapters: every
    /// provider call degrades to absence, so the chain ends in the apology.
    fn test_state() -> (SharedState, std::path::PathBuf) {
        let entries = vec![frontdesk_core::KnowledgeEntry::Qa {
            question: "What are the school timings?".into(),
            answer: "8 AM to 2 PM.".into(),
        }];
        let index = EmbeddingIndex::build(&entries, Arc::new(HashEmbedder));
        let adapters = frontdesk_providers::build_adapters(&AppConfig::default());
        let engine = Arc::new(AnswerEngine::new(
            index,
            adapters.primary,
            adapters.secondary,
            adapters.general,
        ));

        let tmp = tempfile::NamedTempFile::new().unwrap();
        let history_path = tmp.path().to_path_buf();
        drop(tmp);
        let history = Arc::new(HistoryStore::new(history_path.clone()));

        (Arc::new(GatewayState { engine, history }), history_path)
    }

    fn ask_request(query: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ask")
            .header("Content-Type", "application/json")
            .body(Body::from(
                serde_json::json!({ "query": query }).to_string(),
            ))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (state, _) = test_state();
        let app = build_router(state);

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app.oneshot(ask_request("   ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }

    #[tokio::test]
    async fn unconfigured_adapters_degrade_to_apology() {
        let (state, history_path) = test_state();
        let app = build_router(state);

        let response = app.oneshot(ask_request("what are the timings?")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["answer"], APOLOGY_REPLY);

        // The exchange must have been recorded.
        let content = std::fs::read_to_string(&history_path).unwrap();
        let exchanges: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(exchanges.len(), 1);
        assert_eq!(exchanges[0]["query"], "what are the timings?");
    }

    #[tokio::test]
    async fn address_query_returns_canned_address() {
        let (state, _) = test_state();
        let app = build_router(state);

        let response = app.oneshot(ask_request("where is the school")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["answer"], SCHOOL_ADDRESS_REPLY);
    }

    #[tokio::test]
    async fn query_is_trimmed_before_processing() {
        let (state, history_path) = test_state();
        let app = build_router(state);

        let response = app.oneshot(ask_request("  where is the school  ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let content = std::fs::read_to_string(&history_path).unwrap();
        let exchanges: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(exchanges[0]["query"], "where is the school");
    }
}
