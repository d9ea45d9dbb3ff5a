//! Domain Layer - 领域层
//!
//! 包含:
//! - Script Context: 对话脚本的提示词、解析与渲染
//! - Voice Cast: 说话人到音色的固定映射

pub mod script;
mod voice_cast;

pub use voice_cast::{VoiceCast, DEFAULT_GUEST_VOICE_ID, DEFAULT_HOST_VOICE_ID};
