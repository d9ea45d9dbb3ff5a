//! 应用层 - 命令
//!
//! 脚本生成与音频合成两个用例

mod podcast_commands;
mod script_commands;

pub mod handlers;

pub use podcast_commands::*;
pub use script_commands::*;
