// src/types/job.rs
//! Job posting records as they flow through crawl, fetch and scoring

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::analysis::ScoringResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Inline description recovered from a sniffed job API, if any
    pub raw_content: Option<String>,
    #[serde(default)]
    pub fetched_description: String,
    #[serde(default)]
    pub match_score: u8,
    #[serde(default)]
    pub matching_skills: BTreeSet<String>,
    #[serde(default)]
    pub missing_skills: BTreeSet<String>,
    #[serde(default)]
    pub best_projects: BTreeSet<String>,
    #[serde(default)]
    pub company: String,
}

impl JobPosting {
    pub fn new(id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        let content = content.into();
        self.raw_content = if content.trim().is_empty() {
            None
        } else {
            Some(content)
        };
        self
    }

    /// Length of inline content in chars, 0 when absent
    pub fn content_len(&self) -> usize {
        self.raw_content
            .as_deref()
            .map(|c| c.chars().count())
            .unwrap_or(0)
    }

    /// Copy the scoring outcome and fetched text onto the posting
    pub fn enrich(&mut self, description: String, result: &ScoringResult, company: &str) {
        self.fetched_description = description;
        self.match_score = result.score;
        self.matching_skills = result.matching_skills.iter().cloned().collect();
        self.missing_skills = result.missing_skills.iter().cloned().collect();
        self.best_projects = result.best_projects.iter().cloned().collect();
        self.company = company.to_string();
    }
}
