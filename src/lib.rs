// src/lib.rs
pub mod career_crawler;
pub mod cli;
pub mod console;
pub mod core;
pub mod job_analysis;
pub mod pipeline;
pub mod resume;
pub mod template_processor;
pub mod types;
pub mod utils;

pub use cli::{handle_command, ScoutCli};
pub use pipeline::Pipeline;
