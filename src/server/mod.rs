pub mod error;
pub mod handlers;
pub mod models;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::chat::{ChatSession, ConversationRouter};
use crate::document::DocumentAnalyzer;

/// Shared handler state.
///
/// Sessions are keyed by caller-chosen id, and each entry carries its own
/// lock; concurrent turns in different sessions never serialize on the
/// registry lock.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<DocumentAnalyzer>,
    pub router: Arc<ConversationRouter>,
    sessions: Arc<Mutex<HashMap<String, Arc<Mutex<ChatSession>>>>>,
}

impl AppState {
    #[must_use]
    pub fn new(analyzer: Arc<DocumentAnalyzer>, router: Arc<ConversationRouter>) -> Self {
        Self {
            analyzer,
            router,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the session for `session_id`, creating it on first use.
    pub async fn session(&self, session_id: &str) -> Arc<Mutex<ChatSession>> {
        let mut sessions = self.sessions.lock().await;
        Arc::clone(
            sessions
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(ChatSession::default()))),
        )
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/analyze", post(handlers::analyze_document))
        .route("/api/v1/chat", post(handlers::chat))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(
    addr: SocketAddr,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting server on {}", addr);

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Analysis endpoint: http://{}/api/v1/analyze", addr);
    tracing::info!("Chat endpoint: http://{}/api/v1/chat", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
