//! Forecast analysis through an OpenAI-compatible inference gateway
//!
//! Sends a single non-streaming chat completion with the serialized
//! forecast JSON appended to the configured prompt and returns the
//! first choice's message content verbatim.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Fixed model identifier submitted with every completion request
pub const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the chat-completion inference gateway
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AnalysisClient {
    /// Create a new analysis client against the OpenRouter gateway
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, OPENROUTER_BASE_URL)
    }

    /// Create a client against a custom gateway (used by tests)
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Submit the forecast for analysis and return the summary text.
    #[instrument(skip(self, forecast, prompt))]
    pub async fn analyze(&self, forecast: &Value, prompt: &str) -> Result<String> {
        let content = build_prompt(prompt, forecast)?;
        debug!("Submitting completion request ({} chars)", content.len());

        let request = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .with_context(|| "Completion request failed")?
            .error_for_status()
            .with_context(|| "Inference gateway returned an error status")?;

        let completion: ChatResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(anyhow!("No choices in completion response"))
    }
}

/// Concatenate the prompt and the serialized forecast, with no
/// delimiter between them.
fn build_prompt(prompt: &str, forecast: &Value) -> Result<String> {
    let serialized =
        serde_json::to_string(forecast).with_context(|| "Failed to serialize forecast payload")?;
    Ok(format!("{prompt}{serialized}"))
}
