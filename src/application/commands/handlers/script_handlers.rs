//! Script Command Handlers

use std::sync::Arc;

use crate::application::commands::script_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{CompletionRequest, TextGenerationPort};
use crate::domain::script::{build_script_prompt, parse_script, ScriptResult, SYSTEM_INSTRUCTION};

/// GenerateScript Handler - 生成对话脚本
///
/// 主题 → 提示词 → 文本生成 → 解析
pub struct GenerateScriptHandler {
    text_generator: Arc<dyn TextGenerationPort>,
    settings: ScriptGenerationSettings,
}

impl GenerateScriptHandler {
    pub fn new(
        text_generator: Arc<dyn TextGenerationPort>,
        settings: ScriptGenerationSettings,
    ) -> Self {
        Self {
            text_generator,
            settings,
        }
    }

    pub async fn handle(&self, cmd: GenerateScriptCommand) -> Result<ScriptResult, ApplicationError> {
        let topic = cmd.topic.trim();
        if topic.is_empty() {
            return Err(ApplicationError::validation("Topic must not be empty"));
        }
        let topic_chars = topic.chars().count();
        if topic_chars > self.settings.max_topic_chars {
            return Err(ApplicationError::validation(format!(
                "Topic is too long: {} characters (max {})",
                topic_chars, self.settings.max_topic_chars
            )));
        }

        let prompt = build_script_prompt(topic, &self.settings.prompt);
        let request = CompletionRequest {
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            ..CompletionRequest::new(SYSTEM_INSTRUCTION, prompt)
        };

        tracing::info!(topic = %topic, "Generating podcast script");

        let response = self.text_generator.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, "Text generation provider failed");
            ApplicationError::from(e)
        })?;

        let segments = parse_script(&response.text);
        if segments.is_empty() {
            // 不是错误：原文仍返回给调用方，但不能用于合成
            tracing::warn!(
                raw_len = response.text.len(),
                "Generated script contains no Host/Guest segments"
            );
        } else {
            tracing::info!(
                segments = segments.len(),
                model = ?response.model,
                total_tokens = ?response.total_tokens,
                "Script generated"
            );
        }

        Ok(ScriptResult::new(response.text, segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{CompletionResponse, LlmError};
    use crate::domain::script::{Segment, Speaker};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 返回固定文本并记录请求的生成器
    struct ScriptedGenerator {
        reply: Result<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerationPort for ScriptedGenerator {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(CompletionResponse {
                    text: text.clone(),
                    model: Some("test-model".to_string()),
                    total_tokens: Some(42),
                }),
                Err(message) => Err(LlmError::RateLimited(message.clone())),
            }
        }
    }

    fn handler(generator: Arc<ScriptedGenerator>) -> GenerateScriptHandler {
        GenerateScriptHandler::new(generator, ScriptGenerationSettings::default())
    }

    #[tokio::test]
    async fn test_generates_and_parses_script() {
        let generator = ScriptedGenerator::replying(
            "Here is your script:\nHost: Welcome to the show.\nGuest: Thanks for having me.\n",
        );
        let result = handler(generator.clone())
            .handle(GenerateScriptCommand {
                topic: "  deep sea creatures ".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            result.segments(),
            &[
                Segment::new(Speaker::Host, "Welcome to the show.").unwrap(),
                Segment::new(Speaker::Guest, "Thanks for having me.").unwrap(),
            ]
        );
        assert!(result.raw_text().starts_with("Here is your script:"));

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, SYSTEM_INSTRUCTION);
        assert!(requests[0].prompt.contains("\"deep sea creatures\""));
    }

    #[tokio::test]
    async fn test_empty_topic_rejected_without_provider_call() {
        let generator = ScriptedGenerator::replying("Host: unused");
        let err = handler(generator.clone())
            .handle(GenerateScriptCommand {
                topic: "   ".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_overlong_topic_rejected() {
        let generator = ScriptedGenerator::replying("Host: unused");
        let handler = GenerateScriptHandler::new(
            generator.clone(),
            ScriptGenerationSettings {
                max_topic_chars: 10,
                ..Default::default()
            },
        );
        let err = handler
            .handle(GenerateScriptCommand {
                topic: "a topic that is far too long".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_external_error() {
        let generator = ScriptedGenerator::failing("quota exceeded");
        let err = handler(generator)
            .handle(GenerateScriptCommand {
                topic: "volcanoes".to_string(),
            })
            .await
            .unwrap_err();

        match err {
            ApplicationError::ExternalServiceError(msg) => assert!(msg.contains("quota exceeded")),
            other => panic!("expected external service error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unlabeled_output_returns_raw_text_with_no_segments() {
        let generator = ScriptedGenerator::replying("I cannot write that script.");
        let result = handler(generator)
            .handle(GenerateScriptCommand {
                topic: "volcanoes".to_string(),
            })
            .await
            .unwrap();

        assert!(!result.is_playable());
        assert_eq!(result.raw_text(), "I cannot write that script.");
    }

    #[tokio::test]
    async fn test_settings_forwarded_to_request() {
        let generator = ScriptedGenerator::replying("Host: ok");
        let handler = GenerateScriptHandler::new(
            generator.clone(),
            ScriptGenerationSettings {
                temperature: Some(0.5),
                max_tokens: Some(900),
                ..Default::default()
            },
        );
        handler
            .handle(GenerateScriptCommand {
                topic: "bees".to_string(),
            })
            .await
            .unwrap();

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests[0].temperature, Some(0.5));
        assert_eq!(requests[0].max_tokens, Some(900));
    }
}
