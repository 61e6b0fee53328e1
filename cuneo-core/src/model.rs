use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Civil zone the service reports local time in.
pub const LOCAL_ZONE: Tz = chrono_tz::Europe::Rome;

/// A fixed weather station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Tz,
}

pub const CUNEO: Location = Location {
    name: "Cuneo",
    latitude: 44.384,
    longitude: 7.543,
    timezone: LOCAL_ZONE,
};

/// Current conditions for a location.
///
/// `temperature` and `humidity` are `None` when the upstream omits them;
/// they are never defaulted to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherReading {
    #[schema(example = "Cuneo")]
    pub city: String,
    /// Degrees Celsius, as reported upstream.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeReading {
    /// Current instant carrying the zone's UTC offset.
    #[schema(value_type = String, format = DateTime)]
    pub current_time: DateTime<FixedOffset>,
    #[schema(example = "Europe/Rome")]
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub response: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self { status: "healthy".to_string() }
    }
}
