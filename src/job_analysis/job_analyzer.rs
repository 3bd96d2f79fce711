// src/job_analysis/job_analyzer.rs
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::prompts;
use crate::core::{ChatRequest, LlmClient};
use crate::types::{CandidateProfile, ScoringResult};

const SCORING_TEMPERATURE: f32 = 0.1;

/// Scores one job description against the candidate profile
pub struct JobAnalyzer {
    llm: Arc<LlmClient>,
    profile_path: PathBuf,
    experience_summary: String,
}

impl JobAnalyzer {
    pub fn new(llm: Arc<LlmClient>, profile_path: PathBuf, experience_summary: String) -> Self {
        Self {
            llm,
            profile_path,
            experience_summary,
        }
    }

    /// Never fails: an unusable reply becomes `ScoringResult::failed()`
    pub async fn analyze(&self, job_text: &str, title: &str) -> ScoringResult {
        // Re-read on every call so profile edits apply mid-run
        let profile = CandidateProfile::load(&self.profile_path).await;

        let prompt =
            prompts::scoring_prompt(title, job_text, &profile.raw, &self.experience_summary);
        let request = ChatRequest::user(self.llm.model(), prompt, SCORING_TEMPERATURE);

        match self.llm.complete_json("Job scoring", &request).await {
            Some(value) => {
                let result = ScoringResult::from_value(&value);
                info!("Scored '{}': {} ({})", title, result.score, result.reason);
                result
            }
            None => {
                warn!("Scoring failed for '{}', using default result", title);
                ScoringResult::failed()
            }
        }
    }
}
