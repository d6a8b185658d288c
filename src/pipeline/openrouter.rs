//! OpenRouter chat-completions client.
//!
//! One trait seam (`ChatClient`) between the analysis pipeline and the
//! upstream API, with an HTTP implementation and a scriptable mock. Each
//! call is a single system+user exchange; the user turn is either plain
//! text or text parts plus the exam image as a data URL.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::{AppConfig, APP_NAME, OPENROUTER_REFERER};

use super::AnalysisError;

/// What the user turn carries.
#[derive(Debug, Clone, PartialEq)]
pub enum UserContent {
    Text(String),
    ImageWithCaption { caption: String, data_url: String },
}

/// Seam between the pipeline and the chat-completions API.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one system+user exchange, returning the assistant's text.
    async fn chat(
        &self,
        model: &str,
        system: &str,
        user: UserContent,
        temperature: f32,
    ) -> Result<String, AnalysisError>;
}

/// HTTP client for an OpenRouter-compatible chat-completions API.
pub struct OpenRouterClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl OpenRouterClient {
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
            timeout_secs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.base_url, &config.api_key, config.request_timeout_secs)
    }
}

// ──────────────────────────────────────────────
// Wire types
// ──────────────────────────────────────────────

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_messages(system: &str, user: UserContent) -> Vec<ChatMessage> {
    let user_content = match user {
        UserContent::Text(text) => MessageContent::Text(text),
        UserContent::ImageWithCaption { caption, data_url } => MessageContent::Parts(vec![
            ContentPart::Text { text: caption },
            ContentPart::ImageUrl {
                image_url: ImageUrl { url: data_url },
            },
        ]),
    };

    vec![
        ChatMessage {
            role: "system",
            content: MessageContent::Text(system.to_string()),
        },
        ChatMessage {
            role: "user",
            content: user_content,
        },
    ]
}

#[async_trait]
impl ChatClient for OpenRouterClient {
    async fn chat(
        &self,
        model: &str,
        system: &str,
        user: UserContent,
        temperature: f32,
    ) -> Result<String, AnalysisError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: model.to_string(),
            messages: build_messages(system, user),
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", OPENROUTER_REFERER)
            .header("X-Title", APP_NAME)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    AnalysisError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    AnalysisError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)
    }
}

// ──────────────────────────────────────────────
// MockChatClient (testing)
// ──────────────────────────────────────────────

/// Scriptable mock: returns queued results in call order, then falls back
/// to the default response. Records the model asked for on each call.
pub struct MockChatClient {
    default_response: String,
    script: Mutex<VecDeque<Result<String, AnalysisError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockChatClient {
    pub fn new(default_response: &str) -> Self {
        Self {
            default_response: default_response.to_string(),
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_ok(self, response: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        self
    }

    pub fn with_err(self, err: AnalysisError) -> Self {
        self.script.lock().unwrap().push_back(Err(err));
        self
    }

    /// Models requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(
        &self,
        model: &str,
        _system: &str,
        _user: UserContent,
        _temperature: f32,
    ) -> Result<String, AnalysisError> {
        self.calls.lock().unwrap().push(model.to_string());
        if let Some(result) = self.script.lock().unwrap().pop_front() {
            return result;
        }
        Ok(self.default_response.clone())
    }
}
