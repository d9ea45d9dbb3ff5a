//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod concat;
pub mod llm;
pub mod tts;

pub use concat::*;
pub use llm::*;
pub use tts::*;
