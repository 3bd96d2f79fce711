// src/core/mod.rs
//! Configuration, file system and LLM plumbing shared by every stage

pub mod config_manager;
pub mod fs_ops;
pub mod llm_client;

pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use llm_client::{ChatRequest, LlmClient, LlmError};
