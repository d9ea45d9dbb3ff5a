//! LLM Adapter - 文本生成客户端实现

mod fake_script_writer;
mod openai_chat_client;

pub use fake_script_writer::FakeScriptWriter;
pub use openai_chat_client::*;
