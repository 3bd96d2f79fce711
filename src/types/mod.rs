// src/types/mod.rs
pub mod analysis;
pub mod job;

pub use analysis::{CandidateProfile, ResumeContent, ScoringResult, ShortlistReport};
pub use job::JobPosting;
