//! Script Commands - 脚本生成命令

use crate::domain::script::PromptOptions;

/// 生成脚本命令
#[derive(Debug, Clone)]
pub struct GenerateScriptCommand {
    pub topic: String,
}

/// 脚本生成参数
#[derive(Debug, Clone)]
pub struct ScriptGenerationSettings {
    pub prompt: PromptOptions,
    /// 主题最大字符数
    pub max_topic_chars: usize,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for ScriptGenerationSettings {
    fn default() -> Self {
        Self {
            prompt: PromptOptions::default(),
            max_topic_chars: 500,
            temperature: None,
            max_tokens: None,
        }
    }
}
