//! Text Generation Port - 文本生成（LLM）抽象
//!
//! 定义对话脚本生成所需的补全接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 文本生成错误
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 补全请求
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// 系统指令
    pub system: String,
    /// 用户提示词
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// 补全响应
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// 生成的文本
    pub text: String,
    /// 实际使用的模型
    pub model: Option<String>,
    /// 消耗的 token 总数
    pub total_tokens: Option<u32>,
}

/// Text Generation Port
#[async_trait]
pub trait TextGenerationPort: Send + Sync {
    /// 发送提示词并返回生成的文本
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
