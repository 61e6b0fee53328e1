use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Upstream, UpstreamError},
    model::ChatReply,
};

use super::{ChatCompletion, truncate_body};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const MAX_TOKENS: u32 = 150;

/// Client for the OpenAI chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(http: Client, api_key: String) -> Self {
        Self::with_base_url(http, api_key, OPENAI_BASE_URL)
    }

    pub fn with_base_url(http: Client, api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OaMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct OaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OaMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OaChatResponse {
    choices: Vec<OaChoice>,
}

#[derive(Debug, Deserialize)]
struct OaChoice {
    message: OaChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OaChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OaErrorResponse {
    error: OaErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OaErrorDetail {
    message: String,
}

fn single_turn(message: &str) -> OaChatRequest<'static> {
    OaChatRequest {
        model: CHAT_MODEL,
        messages: vec![OaMessage { role: "user".to_string(), content: message.to_string() }],
        max_tokens: MAX_TOKENS,
    }
}

/// Prefer the provider's own error message over the raw body.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<OaErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| truncate_body(body))
}

fn parse_completion(body: &str) -> Result<String, UpstreamError> {
    let parsed: OaChatResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::decode(Upstream::OpenAi, e))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::decode(Upstream::OpenAi, "response contained no choices"))?;

    choice
        .message
        .content
        .ok_or_else(|| UpstreamError::decode(Upstream::OpenAi, "first choice has no content"))
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, message: &str) -> Result<ChatReply, UpstreamError> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(%url, model = CHAT_MODEL, chars = message.chars().count(), "requesting chat completion");

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&single_turn(message))
            .send()
            .await
            .map_err(|e| UpstreamError::transport(Upstream::OpenAi, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| UpstreamError::transport(Upstream::OpenAi, e))?;

        if !status.is_success() {
            return Err(UpstreamError::Rejected {
                upstream: Upstream::OpenAi,
                status,
                message: rejection_message(&body),
            });
        }

        let response = parse_completion(&body)?;

        Ok(ChatReply { response, timestamp: Utc::now() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_is_a_single_user_turn() {
        let payload = serde_json::to_value(single_turn("Che tempo fa?")).unwrap();

        assert_eq!(payload["model"], "gpt-3.5-turbo");
        assert_eq!(payload["max_tokens"], 150);
        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "Che tempo fa?");
    }

    #[test]
    fn first_choice_content_is_returned_verbatim() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "  Sunny, 21°C.\n"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}, "finish_reason": "stop"}
            ]
        }"#;

        assert_eq!(parse_completion(body).unwrap(), "  Sunny, 21°C.\n");
    }

    #[test]
    fn empty_choices_is_a_decode_error() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert_eq!(err.kind(), "decode");
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn null_content_is_a_decode_error() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let err = parse_completion(body).unwrap_err();
        assert!(err.to_string().contains("no content"));
    }

    #[test]
    fn provider_error_message_is_extracted() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests", "code": null}}"#;
        assert_eq!(rejection_message(body), "Rate limit reached");
        assert_eq!(rejection_message("upstream down"), "upstream down");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = OpenAiClient::new(Client::new(), "sk-secret".to_string());
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("sk-secret"));
    }
}
