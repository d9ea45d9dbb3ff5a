//! Podcaster - 双人对话播客生成服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Script Context: 提示词、脚本解析与渲染
//! - Voice Cast: 说话人 → 音色映射
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TextGeneration, TtsEngine, AudioConcatenator）
//! - Commands: 脚本生成 / 音频合成
//! - Queries: 音色列表
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: OpenAI Chat Client, ElevenLabs Client, Stream Concatenator, 离线 Fake 实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
