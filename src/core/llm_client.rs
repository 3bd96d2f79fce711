// src/core/llm_client.rs
//! Chat-completion client for OpenAI-compatible endpoints (Groq by default)

use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::config_manager::{LlmConfig, PacingConfig};
use crate::job_analysis::response_parser;

const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by LLM API")]
    RateLimited,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

// ===== Wire Types =====

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatRequest {
    /// Single user message request
    pub fn user(model: &str, prompt: String, temperature: f32) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature,
            response_format: None,
        }
    }

    /// Ask the endpoint to constrain output to a JSON object
    pub fn json_object(mut self) -> Self {
        self.response_format = Some(ResponseFormat {
            format_type: "json_object".to_string(),
        });
        self
    }
}

impl ChatResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

// ===== Client =====

pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    pacing: PacingConfig,
}

impl LlmClient {
    pub fn new(config: &LlmConfig, pacing: PacingConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            pacing,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One round trip, returning the first choice's text
    pub async fn send(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;
        chat.into_content().ok_or(LlmError::EmptyContent)
    }

    /// Send with up to three attempts and recover the first JSON object.
    /// Rate limits sleep for the configured period; other failures and
    /// unparseable replies pause briefly and retry. Returns None once all
    /// attempts are spent.
    pub async fn complete_json(&self, context: &str, request: &ChatRequest) -> Option<Value> {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.send(request).await {
                Ok(text) => {
                    if let Some(value) = response_parser::parse_object(&text) {
                        debug!("{}: parsed JSON reply on attempt {}", context, attempt);
                        return Some(value);
                    }
                    warn!("{}: no JSON object in reply (attempt {})", context, attempt);
                }
                Err(LlmError::RateLimited) => {
                    let pause = self.pacing.rate_limit_sleep();
                    println!("      ⚠️ Rate limit. Sleeping {}s...", pause.as_secs());
                    info!("{}: rate limited, sleeping {:?}", context, pause);
                    tokio::time::sleep(pause).await;
                    continue;
                }
                Err(LlmError::Api { status, message }) => {
                    println!("      ⚠️ API Error {}: {}", status, message);
                    warn!("{}: API error {}: {}", context, status, message);
                }
                Err(e) => {
                    warn!("{}: request failed (attempt {}): {}", context, attempt, e);
                }
            }

            tokio::time::sleep(self.pacing.retry_pause()).await;
        }

        warn!("{}: giving up after {} attempts", context, MAX_ATTEMPTS);
        None
    }
}
