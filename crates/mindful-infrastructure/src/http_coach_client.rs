//! HttpCoachClient - REST implementation of the coach completion endpoint.
//!
//! Posts `{"messages": [...]}` and reads the `completion` field of the reply.

use async_trait::async_trait;
use mindful_core::coach::{ChatMessage, CoachClient};
use mindful_core::config::CoachConfig;
use mindful_core::error::{MindfulError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone)]
pub struct HttpCoachClient {
    client: Client,
    endpoint: String,
}

impl HttpCoachClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| MindfulError::coach(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &CoachConfig) -> Result<Self> {
        Self::new(config.endpoint.clone(), Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl CoachClient for HttpCoachClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = CompletionRequest { messages };
        tracing::debug!(endpoint = %self.endpoint, messages = messages.len(), "requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| MindfulError::coach(format!("Coach request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read coach error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|err| MindfulError::coach(format!("Failed to parse coach response: {err}")))?;

        extract_completion(parsed)
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    completion: Option<String>,
}

fn extract_completion(response: CompletionResponse) -> Result<String> {
    response
        .completion
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| MindfulError::coach("Coach endpoint returned no completion"))
}

fn map_http_error(status: StatusCode, body: String) -> MindfulError {
    let snippet: String = body.chars().take(200).collect();
    MindfulError::coach(format!("HTTP {}: {}", status.as_u16(), snippet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindful_core::coach::ChatRole;

    #[test]
    fn test_request_body_shape() {
        let messages = vec![ChatMessage::system("ctx"), ChatMessage::user("hello")];
        let json = serde_json::to_value(CompletionRequest {
            messages: &messages,
        })
        .unwrap();
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(messages[0].role, ChatRole::System);
    }

    #[test]
    fn test_extract_completion() {
        let ok: CompletionResponse = serde_json::from_str(r#"{"completion":"Breathe."}"#).unwrap();
        assert_eq!(extract_completion(ok).unwrap(), "Breathe.");

        let empty: CompletionResponse = serde_json::from_str(r#"{"other":1}"#).unwrap();
        assert!(matches!(extract_completion(empty), Err(MindfulError::Coach(_))));
    }

    #[test]
    fn test_http_error_mapping() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert_eq!(err.to_string(), "Coach error: HTTP 502: upstream down");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_coach_error() {
        let client = HttpCoachClient::new("http://127.0.0.1:9/ai/llm", Duration::from_millis(500)).unwrap();
        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, MindfulError::Coach(_)));
    }
}
