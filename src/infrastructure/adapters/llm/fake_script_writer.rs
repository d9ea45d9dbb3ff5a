//! Fake Script Writer - 离线脚本生成器
//!
//! 不调用任何文本生成服务，根据提示词中的主题返回固定模板对话

use async_trait::async_trait;

use crate::application::ports::{CompletionRequest, CompletionResponse, LlmError, TextGenerationPort};
use crate::domain::script::topic_from_prompt;

/// Fake Script Writer
///
/// 用于本地开发和测试
#[derive(Debug, Default, Clone)]
pub struct FakeScriptWriter;

impl FakeScriptWriter {
    pub fn new() -> Self {
        Self
    }

    /// 从提示词中取回主题，取不到时使用通用主题
    fn extract_topic(prompt: &str) -> &str {
        topic_from_prompt(prompt)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("today's topic")
    }
}

#[async_trait]
impl TextGenerationPort for FakeScriptWriter {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let topic = Self::extract_topic(&request.prompt);
        tracing::debug!(topic = %topic, "FakeScriptWriter: returning template script");

        let text = format!(
            "Host: Welcome back to the show! Today we're talking about {topic}.\n\
             Guest: Thanks for having me. It's a subject I never get tired of.\n\
             Host: So let's start simple. Why should our listeners care about {topic}?\n\
             Guest: Because it touches more of everyday life than most people realize.\n\
             Host: That's a great place to wrap up. Thanks for joining us!\n\
             Guest: My pleasure. Thanks, everyone, for listening.",
            topic = topic
        );

        Ok(CompletionResponse {
            text,
            model: Some("fake".to_string()),
            total_tokens: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::script::{build_script_prompt, parse_script, PromptOptions, Speaker};

    #[tokio::test]
    async fn test_template_script_parses_into_alternating_turns() {
        let prompt = build_script_prompt("urban gardening", &PromptOptions::default());
        let response = FakeScriptWriter::new()
            .complete(CompletionRequest::new("system", prompt))
            .await
            .unwrap();

        assert!(response.text.contains("urban gardening"));
        let segments = parse_script(&response.text);
        assert_eq!(segments.len(), 6);
        assert_eq!(segments[0].speaker, Speaker::Host);
        assert_eq!(segments[5].speaker, Speaker::Guest);
    }

    #[test]
    fn test_topic_fallback() {
        assert_eq!(FakeScriptWriter::extract_topic("no quotes"), "today's topic");
        assert_eq!(
            FakeScriptWriter::extract_topic("a \"quoted\" prompt"),
            "today's topic"
        );
    }

    #[tokio::test]
    async fn test_quoted_topic_is_not_truncated() {
        let topic = "the \"Mozart effect\" myth";
        let prompt = build_script_prompt(topic, &PromptOptions::default());
        let response = FakeScriptWriter::new()
            .complete(CompletionRequest::new("system", prompt))
            .await
            .unwrap();

        assert!(response.text.contains(topic));
    }
}
