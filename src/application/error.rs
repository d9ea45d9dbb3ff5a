//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{ConcatError, LlmError, TtsError};
use crate::domain::script::ScriptError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 输入验证错误（在任何外部调用之前拒绝）
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 外部服务错误（文本生成 / TTS 提供方）
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建外部服务错误
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalServiceError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<ScriptError> for ApplicationError {
    fn from(err: ScriptError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<LlmError> for ApplicationError {
    fn from(err: LlmError) -> Self {
        Self::ExternalServiceError(format!("Text generation failed: {}", err))
    }
}

impl From<TtsError> for ApplicationError {
    fn from(err: TtsError) -> Self {
        Self::ExternalServiceError(format!("Text-to-speech failed: {}", err))
    }
}

impl From<ConcatError> for ApplicationError {
    fn from(err: ConcatError) -> Self {
        Self::InternalError(format!("Audio concatenation failed: {}", err))
    }
}
