//! Core library for the Cuneo weather API.
//!
//! This crate defines:
//! - Configuration loading (file + environment)
//! - Clients for the upstream weather and chat-completion APIs
//! - The local-time clock
//! - Shared domain models and the upstream error type
//!
//! It is used by `cuneo-server`, but the clients can be reused on their own.

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use clock::ZoneClock;
pub use config::{Config, ServerConfig};
pub use error::{Upstream, UpstreamError};
pub use model::{
    CUNEO, ChatReply, ChatRequest, HealthStatus, LOCAL_ZONE, Location, TimeReading, WeatherReading,
};
pub use provider::{ChatCompletion, OpenAiClient, OpenMeteoClient, WeatherSource};
