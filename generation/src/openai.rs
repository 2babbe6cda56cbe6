use crate::error::GenerationError;
use crate::generator::{GeneratedText, Generator};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an OpenAI-compatible chat completions endpoint
/// (OpenAI, Ollama, LM Studio, llama.cpp server).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL up to and including the API version, e.g. `http://localhost:11434/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name passed through to the endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: u32,

    #[serde(default)]
    pub temperature: f32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding a bearer token, if the endpoint needs one
    #[serde(default)]
    pub api_key_env: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_max_new_tokens() -> u32 {
    256
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_new_tokens: default_max_new_tokens(),
            temperature: 0.0,
            timeout_secs: default_timeout_secs(),
            api_key_env: None,
        }
    }
}

impl GenerationConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_new_tokens == 0 {
            return Err("max_new_tokens must be > 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be in [0.0, 2.0], got {}",
                self.temperature
            ));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}

/// Generator backed by a `/chat/completions` HTTP endpoint
#[derive(Clone)]
pub struct OpenAiCompatibleGenerator {
    http: reqwest::Client,
    config: GenerationConfig,
    api_key: Option<String>,
}

impl OpenAiCompatibleGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        config.validate().map_err(GenerationError::Config)?;

        let api_key = match &config.api_key_env {
            Some(var) => Some(std::env::var(var).map_err(|_| {
                GenerationError::Config(format!("environment variable {var} is not set"))
            })?),
            None => None,
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Config(e.to_string()))?;

        info!(
            "Generation endpoint {} with model {}",
            config.base_url, config.model
        );

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn headers(&self) -> Result<HeaderMap, GenerationError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key.trim()))
                .map_err(|_| GenerationError::Config("invalid API key".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

#[async_trait]
impl Generator for OpenAiCompatibleGenerator {
    async fn generate(&self, prompt: &str) -> Result<Vec<GeneratedText>, GenerationError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            max_tokens: self.config.max_new_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Requesting completion from {url} ({} prompt chars)", prompt.len());

        let resp = self
            .http
            .post(url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_server_error() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::ModelUnavailable(format!("{status} - {body}")));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Request {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        let candidates: Vec<GeneratedText> = parsed
            .choices
            .into_iter()
            .filter_map(|choice| choice.message.content)
            .map(GeneratedText::new)
            .collect();

        debug!("Received {} completion candidates", candidates.len());
        Ok(candidates)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
