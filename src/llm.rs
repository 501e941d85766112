//! OpenAI-compatible chat completions client.
//!
//! Uses reqwest for the HTTP call and serde for the wire types.

use crate::agent::{GenerateError, TextGenerator};
use crate::config::AgentConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("worklog/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions client bound to one model and credential.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a client from the agent settings.
    pub fn new(api_key: impl Into<String>, config: &AgentConfig) -> Result<Self, GenerateError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| GenerateError::Request(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let start = Instant::now();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "LLM request failed");
                GenerateError::Request(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "LLM API error");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Request(e.to_string()))?;
        let content = parse_reply(&body)?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "LLM chat completion"
        );

        Ok(content)
    }
}

/// Extract the first choice's text from a chat completions response body.
fn parse_reply(body: &str) -> Result<String, GenerateError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| GenerateError::Parse(e.to_string()))?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(GenerateError::NoChoices)?;
    Ok(choice.message.content.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
            max_tokens: 500,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "hi"}],
                "max_tokens": 500
            })
        );
    }

    #[test]
    fn parse_reply_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"- one"}},{"message":{"content":"- two"}}]}"#;
        assert_eq!(parse_reply(body).unwrap(), "- one");
    }

    #[test]
    fn parse_reply_without_choices() {
        assert!(matches!(
            parse_reply(r#"{"choices":[]}"#),
            Err(GenerateError::NoChoices)
        ));
    }

    #[test]
    fn parse_reply_malformed() {
        assert!(matches!(parse_reply("not json"), Err(GenerateError::Parse(_))));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let config = AgentConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..AgentConfig::default()
        };
        let client = OpenAiClient::new("key", &config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4o-mini");
    }
}
