use crate::{
    error::UpstreamError,
    model::{ChatReply, Location, WeatherReading},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;
pub mod openai;

pub use open_meteo::OpenMeteoClient;
pub use openai::OpenAiClient;

/// Source of current weather conditions.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current_conditions(&self, location: &Location)
    -> Result<WeatherReading, UpstreamError>;
}

/// Single-turn chat completion backend.
#[async_trait]
pub trait ChatCompletion: Send + Sync + Debug {
    async fn complete(&self, message: &str) -> Result<ChatReply, UpstreamError>;
}

pub const USER_AGENT: &str = concat!("cuneo-core/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared by all upstream clients. Transport defaults apply,
/// including no request timeout.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(USER_AGENT).build()
}

/// Cut an upstream body down to something that fits in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
