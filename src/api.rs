//! REST API server for the Air-Buddy assistant
//!
//! Exposes the conversation dispatcher via HTTP endpoints
//! Integrates with the console frontend

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::models::FinancialSnapshot;
use crate::prefs::{load_theme, save_theme, PreferenceStore, Theme};

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Arc<Dispatcher>,
    pub preferences: Arc<dyn PreferenceStore>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Received chat message");

    if !state.dispatcher.send(&req.message).await {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "Message was empty or a reply is already pending".to_string(),
            )),
        );
    }

    // Block until the full send cycle completes so the caller gets the
    // assistant's answer in one round trip.
    state.dispatcher.wait_until_idle().await;

    let answer = state
        .dispatcher
        .latest()
        .await
        .map(|turn| turn.text)
        .unwrap_or_default();
    let conversation_length = state.dispatcher.transcript().await.len();

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "answer": answer,
            "conversation_length": conversation_length,
        }))),
    )
}

/// =============================
/// Conversation Endpoints
/// =============================

async fn get_conversation(State(state): State<ApiState>) -> Json<ApiResponse> {
    let turns = state.dispatcher.transcript().await;

    Json(ApiResponse::success(serde_json::json!({
        "turns": turns,
        "is_composing": state.dispatcher.is_composing(),
    })))
}

async fn reset_conversation(State(state): State<ApiState>) -> Json<ApiResponse> {
    state.dispatcher.reset().await;
    let turns = state.dispatcher.transcript().await;

    Json(ApiResponse::success(serde_json::json!({
        "turns": turns,
    })))
}

/// =============================
/// Financial Data Feed
/// =============================

async fn push_financial_data(
    State(state): State<ApiState>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> Json<ApiResponse> {
    info!("Financial snapshot received from analytics feed");
    state.dispatcher.set_snapshot(snapshot).await;

    Json(ApiResponse::success(serde_json::json!({
        "accepted": true,
    })))
}

/// =============================
/// Theme Preference
/// =============================

async fn get_theme(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    match load_theme(state.preferences.as_ref()).await {
        Ok(theme) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "theme": theme,
            }))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to load theme: {}", e))),
        ),
    }
}

async fn set_theme(
    State(state): State<ApiState>,
    Json(req): Json<ThemeRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    match save_theme(state.preferences.as_ref(), req.theme).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "theme": req.theme,
            }))),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to save theme: {}", e))),
        ),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(dispatcher: Arc<Dispatcher>, preferences: Arc<dyn PreferenceStore>) -> Router {
    let state = ApiState {
        dispatcher,
        preferences,
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat_handler))
        .route("/api/conversation", get(get_conversation))
        .route("/api/reset", post(reset_conversation))
        .route("/api/financial-data", post(push_financial_data))
        .route("/api/theme", get(get_theme).post(set_theme))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    dispatcher: Arc<Dispatcher>,
    preferences: Arc<dyn PreferenceStore>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(dispatcher, preferences);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
