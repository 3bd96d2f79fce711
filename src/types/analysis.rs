// src/types/analysis.rs
//! Loosely-typed structures recovered from LLM output and the candidate profile

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

use super::job::JobPosting;

// ===== Candidate Profile =====

/// Candidate profile JSON, kept verbatim for prompt embedding
#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub raw: String,
    parsed: Value,
}

impl CandidateProfile {
    pub fn from_raw(raw: String) -> Self {
        let parsed = serde_json::from_str(&raw).unwrap_or(Value::Null);
        Self { raw, parsed }
    }

    /// Read the profile from disk. An unreadable file degrades to `{}`.
    pub async fn load(path: &Path) -> Self {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => Self::from_raw(raw),
            Err(e) => {
                warn!("Failed to read profile {}: {}", path.display(), e);
                Self::from_raw("{}".to_string())
            }
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.parsed
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// ===== Scoring =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: u8,
    pub reason: String,
    pub justification: String,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub best_projects: Vec<String>,
    pub recommended_role_type: Option<String>,
    pub company_name: Option<String>,
}

impl ScoringResult {
    /// Result used when every analysis attempt failed
    pub fn failed() -> Self {
        Self {
            score: 0,
            reason: "Failed".to_string(),
            justification: "Analysis failed.".to_string(),
            matching_skills: Vec::new(),
            missing_skills: Vec::new(),
            best_projects: Vec::new(),
            recommended_role_type: None,
            company_name: None,
        }
    }

    /// Optimistic key lookups with defaults, never fails
    pub fn from_value(value: &Value) -> Self {
        Self {
            score: value.get("score").map(parse_score).unwrap_or(0),
            reason: text_field(value, "reason").unwrap_or_default(),
            justification: text_field(value, "justification")
                .unwrap_or_else(|| "No details provided.".to_string()),
            matching_skills: string_list(value.get("matching_skills")),
            missing_skills: string_list(value.get("missing_skills")),
            best_projects: string_list(value.get("best_projects")),
            recommended_role_type: text_field(value, "recommended_role_type"),
            company_name: text_field(value, "company_name"),
        }
    }
}

/// Accepts 78, 78.6, "78", "78%" and clamps to 0-100
fn parse_score(value: &Value) -> u8 {
    let raw = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let digits: String = s
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse::<f64>().unwrap_or(0.0)
        }
        _ => 0.0,
    };

    raw.round().clamp(0.0, 100.0) as u8
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

// ===== Resume Content =====

/// Tailored resume sections; values stay raw JSON since the model may
/// answer with strings, lists or objects for any field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub summary_points: Vec<Value>,
    pub skills_summary: Value,
    pub projects: Vec<Value>,
    pub certifications: Vec<Value>,
}

impl ResumeContent {
    pub fn from_value(value: &Value) -> Self {
        Self {
            summary_points: value_list(value.get("summary_points")),
            skills_summary: value
                .get("skills_summary")
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
            projects: value_list(value.get("projects")),
            certifications: value_list(value.get("certifications")),
        }
    }
}

fn value_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.clone()],
    }
}

// ===== Shortlist Report =====

#[derive(Debug, Serialize)]
pub struct ShortlistReport<'a> {
    pub source_url: &'a str,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub jobs: &'a [JobPosting],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_variants() {
        assert_eq!(parse_score(&json!(78)), 78);
        assert_eq!(parse_score(&json!(78.6)), 79);
        assert_eq!(parse_score(&json!("65%")), 65);
        assert_eq!(parse_score(&json!(" 90 ")), 90);
        assert_eq!(parse_score(&json!(250)), 100);
        assert_eq!(parse_score(&json!(-3)), 0);
        assert_eq!(parse_score(&json!("high")), 0);
        assert_eq!(parse_score(&json!(null)), 0);
    }

    #[test]
    fn test_scoring_result_defaults_missing_fields() {
        let result = ScoringResult::from_value(&json!({ "score": 55 }));
        assert_eq!(result.score, 55);
        assert_eq!(result.justification, "No details provided.");
        assert!(result.matching_skills.is_empty());
        assert_eq!(result.recommended_role_type, None);
    }

    #[test]
    fn test_scoring_result_reads_lists() {
        let result = ScoringResult::from_value(&json!({
            "score": "81",
            "reason": "Strong backend overlap",
            "matching_skills": ["Java", " Spring Boot ", "", null],
            "missing_skills": "Kubernetes",
            "best_projects": ["Expense Tracker"],
            "recommended_role_type": "Backend Java"
        }));

        assert_eq!(result.score, 81);
        assert_eq!(result.matching_skills, vec!["Java", "Spring Boot"]);
        assert_eq!(result.missing_skills, vec!["Kubernetes"]);
        assert_eq!(result.recommended_role_type.as_deref(), Some("Backend Java"));
    }

    #[test]
    fn test_resume_content_accepts_loose_shapes() {
        let content = ResumeContent::from_value(&json!({
            "summary_points": "Single point",
            "skills_summary": { "Backend": ["Rust", "Go"] },
            "projects": [{ "crawler": "Built a crawler" }],
        }));

        assert_eq!(content.summary_points, vec![json!("Single point")]);
        assert!(content.skills_summary.is_object());
        assert_eq!(content.projects.len(), 1);
        assert!(content.certifications.is_empty());
    }

    #[test]
    fn test_profile_name() {
        let profile = CandidateProfile::from_raw(r#"{"name": "Asha Rao", "skills": {}}"#.into());
        assert_eq!(profile.name(), Some("Asha Rao"));

        let broken = CandidateProfile::from_raw("not json".into());
        assert_eq!(broken.name(), None);
        assert_eq!(broken.raw, "not json");
    }
}
