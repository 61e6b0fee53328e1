use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{Upstream, UpstreamError},
    model::{Location, WeatherReading},
};

use super::{WeatherSource, truncate_body};

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Client for the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: String,
    http: Client,
}

impl OpenMeteoClient {
    pub fn new(http: Client) -> Self {
        Self::with_base_url(http, OPEN_METEO_BASE_URL)
    }

    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<String, UpstreamError> {
        let url = format!("{}/forecast", self.base_url);
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        debug!(%url, name = location.name, "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("hourly", "temperature_2m"),
                ("hourly", "relative_humidity_2m"),
                ("timezone", location.timezone.name()),
                ("current_weather", "true"),
            ])
            .send()
            .await
            .map_err(|e| UpstreamError::transport(Upstream::OpenMeteo, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| UpstreamError::transport(Upstream::OpenMeteo, e))?;

        if !status.is_success() {
            return Err(UpstreamError::Rejected {
                upstream: Upstream::OpenMeteo,
                status,
                message: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    current_weather: Option<OmCurrentWeather>,
    #[serde(default)]
    hourly: Option<OmHourly>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    #[serde(default)]
    temperature: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    #[serde(default)]
    relative_humidity_2m: Option<Vec<Option<f64>>>,
}

/// Humidity is the first hourly sample, not the one matching the current
/// hour.
fn parse_forecast(location: &Location, body: &str) -> Result<WeatherReading, UpstreamError> {
    let parsed: OmForecastResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::decode(Upstream::OpenMeteo, e))?;

    let temperature = parsed.current_weather.and_then(|c| c.temperature);

    let humidity = match parsed.hourly.and_then(|h| h.relative_humidity_2m) {
        Some(series) => *series.first().ok_or_else(|| {
            UpstreamError::decode(Upstream::OpenMeteo, "hourly humidity series is empty")
        })?,
        None => None,
    };

    Ok(WeatherReading {
        city: location.name.to_string(),
        temperature,
        humidity,
        timestamp: Utc::now(),
    })
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn current_conditions(
        &self,
        location: &Location,
    ) -> Result<WeatherReading, UpstreamError> {
        let body = self.fetch_forecast(location).await?;
        parse_forecast(location, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CUNEO;

    #[test]
    fn takes_current_temperature_and_first_humidity_sample() {
        let body = r#"{
            "latitude": 44.38,
            "longitude": 7.54,
            "current_weather": {"temperature": 12.4, "windspeed": 5.1, "time": "2024-03-01T10:00"},
            "hourly": {
                "time": ["2024-03-01T00:00", "2024-03-01T01:00"],
                "temperature_2m": [8.1, 7.9],
                "relative_humidity_2m": [87, 90]
            }
        }"#;

        let reading = parse_forecast(&CUNEO, body).unwrap();
        assert_eq!(reading.city, "Cuneo");
        assert_eq!(reading.temperature, Some(12.4));
        assert_eq!(reading.humidity, Some(87.0));
    }

    #[test]
    fn missing_blocks_become_absent() {
        let reading = parse_forecast(&CUNEO, r#"{"latitude": 44.38}"#).unwrap();
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.humidity, None);
    }

    #[test]
    fn null_current_weather_is_absent() {
        let body = r#"{"current_weather": null, "hourly": {"relative_humidity_2m": [64]}}"#;
        let reading = parse_forecast(&CUNEO, body).unwrap();
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.humidity, Some(64.0));
    }

    #[test]
    fn null_hourly_is_absent() {
        let body = r#"{"current_weather": {"temperature": 11.5}, "hourly": null}"#;
        let reading = parse_forecast(&CUNEO, body).unwrap();
        assert_eq!(reading.temperature, Some(11.5));
        assert_eq!(reading.humidity, None);
    }

    #[test]
    fn null_first_sample_is_absent() {
        let body = r#"{"hourly": {"relative_humidity_2m": [null, 70]}}"#;
        let reading = parse_forecast(&CUNEO, body).unwrap();
        assert_eq!(reading.humidity, None);
    }

    #[test]
    fn empty_humidity_series_is_an_error() {
        let body = r#"{"current_weather": {"temperature": 3.0}, "hourly": {"relative_humidity_2m": []}}"#;
        let err = parse_forecast(&CUNEO, body).unwrap_err();
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn wrong_types_are_decode_errors() {
        let body = r#"{"current_weather": {"temperature": "warm"}}"#;
        let err = parse_forecast(&CUNEO, body).unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { upstream: Upstream::OpenMeteo, .. }));
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let err = parse_forecast(&CUNEO, "<html>oops</html>").unwrap_err();
        assert_eq!(err.kind(), "decode");
    }
}
