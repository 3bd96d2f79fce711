// src/job_analysis/mod.rs
pub mod job_analyzer;
pub mod prompts;
pub mod response_parser;
pub mod resume_tailor;
pub mod title_filter;

pub use job_analyzer::JobAnalyzer;
pub use resume_tailor::ResumeTailor;
pub use title_filter::{classify, TitleVerdict};
