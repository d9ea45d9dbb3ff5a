//! 播客脚本提示词
//!
//! 提示词是确定性的：相同主题和选项总是得到相同文本

use super::Speaker;

/// 默认目标字数（约 3-4 分钟口播）
pub const DEFAULT_TARGET_WORDS: usize = 500;

/// 系统指令
pub const SYSTEM_INSTRUCTION: &str = "You are an experienced podcast scriptwriter. \
You write natural, engaging two-person conversations that are meant to be read aloud \
by text-to-speech voices.";

/// 主题前后的固定文本，须与 build_script_prompt 的模板一致
const TOPIC_OPENING: &str = "Write a podcast script about the following topic: \"";
const TOPIC_CLOSING: &str = "\".\n\nThe podcast has exactly two speakers:";

/// 提示词选项
#[derive(Debug, Clone)]
pub struct PromptOptions {
    /// 目标字数
    pub target_words: usize,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            target_words: DEFAULT_TARGET_WORDS,
        }
    }
}

impl PromptOptions {
    /// 估算的口播分钟数范围（按每分钟 130-170 词）
    fn spoken_minutes(&self) -> (usize, usize) {
        let low = (self.target_words / 170).max(1);
        let high = self.target_words.div_ceil(130).max(low);
        (low, high)
    }
}

/// 构造脚本生成提示词
pub fn build_script_prompt(topic: &str, options: &PromptOptions) -> String {
    let host = Speaker::Host.label();
    let guest = Speaker::Guest.label();
    let (min_minutes, max_minutes) = options.spoken_minutes();

    format!(
        "Write a podcast script about the following topic: \"{topic}\".\n\
         \n\
         The podcast has exactly two speakers:\n\
         - {host}: the show's host, who guides the conversation and asks questions.\n\
         - {guest}: an expert guest, who explains the topic with insight and examples.\n\
         \n\
         Length: about {words} words in total, roughly {min_minutes}-{max_minutes} minutes when spoken.\n\
         \n\
         Structure:\n\
         1. Introduction: the {host} welcomes listeners, introduces the topic and the {guest}.\n\
         2. Discussion: a lively back-and-forth exchange exploring the topic's key points.\n\
         3. Closing: the {host} summarizes the main takeaways and thanks the {guest}.\n\
         \n\
         Formatting rules (follow them exactly):\n\
         - Every turn starts on a new line with the speaker label \"{host}:\" or \"{guest}:\", \
         followed by a space and the spoken words.\n\
         - Use only these two labels, spelled exactly as shown.\n\
         - Do not add a title, headings, markdown, stage directions, sound effects or \
         descriptions of actions.\n\
         - Write only the words the speakers say.",
        topic = topic,
        host = host,
        guest = guest,
        words = options.target_words,
        min_minutes = min_minutes,
        max_minutes = max_minutes,
    )
}

/// 从 build_script_prompt 生成的提示词中取回主题
///
/// 主题本身可以包含引号
pub fn topic_from_prompt(prompt: &str) -> Option<&str> {
    let rest = prompt.strip_prefix(TOPIC_OPENING)?;
    let end = rest.find(TOPIC_CLOSING)?;
    Some(&rest[..end])
}
