//! OpenAPI document, served at `/openapi.json` and rendered under `/docs` and `/redoc`.

use cuneo_core::{ChatReply, ChatRequest, HealthStatus, TimeReading, WeatherReading};
use utoipa::OpenApi;

use crate::error::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cuneo Weather API",
        description = "Current weather for Cuneo, local time and AI chat"
    ),
    paths(
        crate::handlers::cuneo_weather,
        crate::handlers::current_time,
        crate::handlers::chat,
        crate::handlers::health,
    ),
    components(schemas(
        WeatherReading,
        TimeReading,
        ChatRequest,
        ChatReply,
        HealthStatus,
        ErrorBody,
    )),
    tags(
        (name = "Weather", description = "Current conditions"),
        (name = "Time", description = "Local time"),
        (name = "Chat", description = "AI chat completion"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in ["/weather/cuneo", "/time", "/chat", "/health"] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }
}
