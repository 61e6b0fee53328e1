use std::sync::Arc;

use anyhow::{Context, Result};
use cuneo_core::{
    ChatCompletion, Config, OpenAiClient, OpenMeteoClient, WeatherSource, ZoneClock,
    provider::build_http_client,
};

/// Dependencies shared by all handlers.
///
/// Built once at startup; the clients hold no per-request state, so one
/// instance serves every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub weather: Arc<dyn WeatherSource>,
    pub chat: Arc<dyn ChatCompletion>,
    pub clock: ZoneClock,
}

impl AppState {
    pub fn new(
        weather: Arc<dyn WeatherSource>,
        chat: Arc<dyn ChatCompletion>,
        clock: ZoneClock,
    ) -> Self {
        Self { weather, chat, clock }
    }

    /// Wire the production Open-Meteo and OpenAI clients.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = build_http_client().context("Failed to build HTTP client")?;

        Ok(Self::new(
            Arc::new(OpenMeteoClient::new(http.clone())),
            Arc::new(OpenAiClient::new(http, config.openai_api_key.clone())),
            ZoneClock::default(),
        ))
    }
}
