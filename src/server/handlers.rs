use axum::extract::State;
use axum::response::Json;

use super::error::AppError;
use super::models::{AnalyzeRequest, AnalyzeResponse, ChatRequest, ChatResponse, HealthResponse};
use super::AppState;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Document analysis endpoint
pub async fn analyze_document(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    tracing::info!(
        "Received analysis request for filename: {}",
        request.filename
    );

    let document_bytes = request.validate_and_decode()?;
    let filename = request.sanitized_filename();

    let result = state
        .analyzer
        .analyze(
            &document_bytes,
            &filename,
            &request.category,
            request.purpose.as_deref(),
            request.extra_context.as_deref(),
        )
        .await;

    match &result.error {
        Some(error) => tracing::info!("Document analysis failed: {}", error),
        None => tracing::info!("Document analysis completed successfully"),
    }

    Ok(Json(AnalyzeResponse::from_result(result)))
}

/// Conversational endpoint
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest(
            "Message must not be empty".to_string(),
        ));
    }

    let session_id = request.session_id.as_deref().unwrap_or("default");
    tracing::debug!("Routing chat message for session: {}", session_id);

    let session = state.session(session_id).await;
    let mut session = session.lock().await;

    let reply = state.router.handle_message(&mut session, message).await;

    Ok(Json(ChatResponse {
        reply,
        profile: session.profile.clone(),
    }))
}
