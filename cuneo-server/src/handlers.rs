//! Request handlers. Each one makes at most a single upstream call.

use axum::{Json, extract::State};
use cuneo_core::{CUNEO, ChatReply, ChatRequest, HealthStatus, TimeReading, WeatherReading};
use tracing::instrument;

use crate::{
    error::{ApiError, ErrorBody},
    state::AppState,
};

/// Current conditions in Cuneo.
#[utoipa::path(
    get,
    path = "/weather/cuneo",
    tag = "Weather",
    summary = "Get Cuneo weather",
    description = "Fetch current temperature and humidity for Cuneo",
    responses(
        (status = 200, description = "Current conditions", body = WeatherReading),
        (status = 500, description = "Weather upstream failed", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn cuneo_weather(
    State(state): State<AppState>,
) -> Result<Json<WeatherReading>, ApiError> {
    let reading = state.weather.current_conditions(&CUNEO).await?;
    Ok(Json(reading))
}

#[utoipa::path(
    get,
    path = "/time",
    tag = "Time",
    summary = "Get current time",
    description = "Current time in the Europe/Rome timezone",
    responses(
        (status = 200, description = "Current local time", body = TimeReading)
    )
)]
pub async fn current_time(State(state): State<AppState>) -> Json<TimeReading> {
    Json(state.clock.now())
}

/// Forward a message to the chat model and return its answer.
#[utoipa::path(
    post,
    path = "/chat",
    tag = "Chat",
    summary = "Chat with AI",
    description = "Send a message to the AI and receive a reply",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Model reply", body = ChatReply),
        (status = 500, description = "Chat upstream failed", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let reply = state.chat.complete(&request.message).await?;
    Ok(Json(reply))
}

/// Liveness only; performs no downstream checks.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}
