//! OpenAI Chat Client - 调用 OpenAI 兼容的 chat completions 接口
//!
//! 实现 TextGenerationPort trait
//!
//! 外部 API:
//! POST {base_url}/chat/completions
//! Request: {"model": "...", "messages": [...], "temperature": 0.8, "max_tokens": 1500}
//! Response: {"choices": [{"message": {"content": "..."}}], "model": "...", "usage": {...}}

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{CompletionRequest, CompletionResponse, LlmError, TextGenerationPort};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    total_tokens: Option<u32>,
}

/// OpenAI 错误响应体
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// OpenAI Chat 客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiChatClientConfig {
    /// API 基础 URL（包含版本前缀，如 https://api.openai.com/v1）
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for OpenAiChatClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
        }
    }
}

impl OpenAiChatClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// OpenAI 兼容的 Chat 客户端
pub struct OpenAiChatClient {
    client: Client,
    config: OpenAiChatClientConfig,
}

impl OpenAiChatClient {
    pub fn new(config: OpenAiChatClientConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

/// 将非 2xx 响应映射为 LlmError
fn map_error_status(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());
    let message = format!("HTTP {}: {}", status.as_u16(), message);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized(message),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(message),
        _ => LlmError::ServiceError(message),
    }
}

/// 从响应体中取出第一条回复
fn parse_completion(body: &str) -> Result<CompletionResponse, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Malformed completion body: {}", e)))?;

    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| LlmError::InvalidResponse("Completion contains no text".to_string()))?;

    Ok(CompletionResponse {
        text,
        model: parsed.model,
        total_tokens: parsed.usage.and_then(|u| u.total_tokens),
    })
}

#[async_trait]
impl TextGenerationPort for OpenAiChatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            url = %self.completions_url(),
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else if e.is_connect() {
                    LlmError::NetworkError(format!("Cannot connect to text generation service: {}", e))
                } else {
                    LlmError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout
            } else {
                LlmError::InvalidResponse(format!("Failed to read body: {}", e))
            }
        })?;

        if !status.is_success() {
            return Err(map_error_status(status, &text));
        }

        let completion = parse_completion(&text)?;

        tracing::info!(
            model = ?completion.model,
            total_tokens = ?completion.total_tokens,
            text_len = completion.text.len(),
            "Chat completion received"
        );

        Ok(completion)
    }
}
