//! HTTP client for an OpenAI-style chat-completions upstream.
//!
//! The client knows nothing about expenses; callers hand it a system prompt
//! and a user message and get the completion text back.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use spendlog_config::AdvisorConfig;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("missing advisor API key")]
    ApiKeyMissing,
    #[error("advice upstream request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("advice upstream returned status {status}")]
    Api { status: u16 },
    #[error("advice upstream returned no completion")]
    EmptyCompletion,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Clone)]
pub struct AdviceClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AdviceClient {
    /// Build a client from configuration, falling back to the
    /// `OPENAI_API_KEY` environment variable for the key.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or(AdvisorError::ApiKeyMissing)?;

        let api_key_source = if config.api_key.is_some() {
            "config"
        } else {
            "env"
        };
        debug!(source = api_key_source, "initialising advice client");

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a single non-streaming completion and return its text.
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, AdvisorError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let request = ChatCompletionRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message.to_string(),
                },
            ],
        };

        debug!(model = %self.model, "requesting chat completion");

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "advice upstream returned an error");
            return Err(AdvisorError::Api {
                status: status.as_u16(),
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(AdvisorError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config_with_key() -> AdvisorConfig {
        AdvisorConfig {
            api_key: Some("sk-test".to_string()),
            ..AdvisorConfig::default()
        }
    }

    #[test]
    #[serial]
    fn from_config_requires_an_api_key() {
        std::env::remove_var("OPENAI_API_KEY");

        let err = AdviceClient::from_config(&AdvisorConfig::default())
            .err()
            .expect("client should not build without a key");
        assert!(matches!(err, AdvisorError::ApiKeyMissing));
    }

    #[test]
    #[serial]
    fn from_config_falls_back_to_environment_key() {
        std::env::set_var("OPENAI_API_KEY", "sk-env");

        let client = AdviceClient::from_config(&AdvisorConfig::default()).unwrap();
        assert_eq!(client.api_key, "sk-env");

        std::env::remove_var("OPENAI_API_KEY");
    }

    #[test]
    #[serial]
    fn from_config_prefers_configured_key_and_model() {
        let client = AdviceClient::from_config(&config_with_key()).unwrap();

        assert_eq!(client.api_key, "sk-test");
        assert_eq!(client.model(), "gpt-3.5-turbo");
        assert_eq!(client.max_tokens, 56);
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn request_serialises_in_chat_completions_shape() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo",
            max_tokens: 56,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "prompt".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: "message".to_string(),
                },
            ],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 56);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "message");
    }

    #[test]
    fn response_parsing_reads_the_first_choice() {
        let body = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {"role": "assistant", "content": "Spend less on coffee."},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 40, "completion_tokens": 12, "total_tokens": 52}
        }"#;

        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content);
        assert_eq!(content.as_deref(), Some("Spend less on coffee."));
    }
}
