//! Script Context - 对话脚本限界上下文
//!
//! 职责:
//! - 说话人与片段值对象
//! - 提示词构造
//! - 模型输出解析

mod errors;
mod parser;
mod prompt;
mod value_objects;

pub use errors::ScriptError;
pub use parser::{parse_script, render_script};
pub use prompt::{
    build_script_prompt, topic_from_prompt, PromptOptions, DEFAULT_TARGET_WORDS,
    SYSTEM_INSTRUCTION,
};
pub use value_objects::{ScriptResult, Segment, Speaker};
