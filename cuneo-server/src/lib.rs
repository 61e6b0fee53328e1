//! HTTP front door for the Cuneo weather API.
//!
//! Routes:
//! - `GET /weather/cuneo`
//! - `GET /time`
//! - `POST /chat`
//! - `GET /health`
//! - `GET /openapi.json`, with Swagger UI at `/docs` and Redoc at `/redoc`

pub mod error;
pub mod handlers;
pub mod openapi;
pub mod server;
pub mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

const DEFAULT_LOG_FILTER: &str = "cuneo_server=info,cuneo_core=info,tower_http=info";

/// Create the application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/weather/cuneo", get(handlers::cuneo_weather))
        .route("/time", get(handlers::current_time))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging. `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => EnvFilter::new(format!(
            "cuneo_server={level},cuneo_core={level},tower_http={level}"
        )),
        None => EnvFilter::new(DEFAULT_LOG_FILTER),
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
