// src/job_analysis/resume_tailor.rs
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::prompts;
use crate::core::{ChatRequest, LlmClient};
use crate::types::{CandidateProfile, JobPosting, ResumeContent};

/// Zero temperature keeps the extraction close to the profile text
const EXTRACTION_TEMPERATURE: f32 = 0.0;

/// Filters the candidate profile down to resume sections for one job
pub struct ResumeTailor {
    llm: Arc<LlmClient>,
    profile_path: PathBuf,
}

impl ResumeTailor {
    pub fn new(llm: Arc<LlmClient>, profile_path: PathBuf) -> Self {
        Self { llm, profile_path }
    }

    pub async fn generate(&self, job: &JobPosting) -> Option<ResumeContent> {
        let profile = CandidateProfile::load(&self.profile_path).await;

        let prompt = prompts::resume_prompt(
            &job.title,
            &job.company,
            &job.fetched_description,
            &profile.raw,
        );
        let request =
            ChatRequest::user(self.llm.model(), prompt, EXTRACTION_TEMPERATURE).json_object();

        let value = self.llm.complete_json("Resume data", &request).await;
        if value.is_none() {
            warn!("No resume data generated for '{}'", job.title);
        }

        value.map(|v| {
            let content = ResumeContent::from_value(&v);
            info!(
                "Resume data for '{}': {} summary points, {} projects, {} certifications",
                job.title,
                content.summary_points.len(),
                content.projects.len(),
                content.certifications.len()
            );
            content
        })
    }
}
