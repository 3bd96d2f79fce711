// src/resume/mod.rs
pub mod latex;
pub mod resume_builder;

pub use resume_builder::ResumeBuilder;
