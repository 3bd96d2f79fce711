// src/resume/resume_builder.rs
//! Renders tailored resume content into the LaTeX template, one file per job

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

use super::latex::{escape, flatten, plain};
use crate::core::FsOps;
use crate::template_processor::TemplateProcessor;
use crate::types::ResumeContent;
use crate::utils::{capitalize, sanitize_job_id};

const TITLE_KEYS: &[&str] = &["title", "name", "project"];
const DESCRIPTION_KEYS: &[&str] = &["description", "details", "summary"];

pub struct ResumeBuilder {
    template: TemplateProcessor,
    output_dir: PathBuf,
    candidate: String,
}

impl ResumeBuilder {
    pub fn new(template_path: PathBuf, output_dir: PathBuf, candidate_name: &str) -> Self {
        let candidate = sanitize_job_id(candidate_name);
        Self {
            template: TemplateProcessor::new(template_path),
            output_dir,
            candidate: if candidate.is_empty() {
                "Candidate".to_string()
            } else {
                candidate
            },
        }
    }

    pub fn output_path(&self, job_id: &str) -> PathBuf {
        self.output_dir.join(format!(
            "Resume_{}_{}.tex",
            self.candidate,
            sanitize_job_id(job_id)
        ))
    }

    /// Write the rendered resume and return its path
    pub async fn build(&self, job_id: &str, content: &ResumeContent) -> Result<PathBuf> {
        let rendered = self
            .template
            .render(&section_variables(content))
            .await
            .with_context(|| {
                format!(
                    "Failed to render resume template {}",
                    self.template.template_path().display()
                )
            })?;

        let path = self.output_path(job_id);
        FsOps::write_file_safe(&path, &rendered).await?;

        info!("Resume written for {}: {}", job_id, path.display());
        Ok(path)
    }
}

pub fn section_variables(content: &ResumeContent) -> HashMap<String, String> {
    HashMap::from([
        (
            "SUMMARY_CONTENT".to_string(),
            summary_section(&content.summary_points),
        ),
        (
            "SKILLS_CONTENT".to_string(),
            skills_section(&content.skills_summary),
        ),
        (
            "PROJECTS_CONTENT".to_string(),
            projects_section(&content.projects),
        ),
        (
            "CERTIFICATIONS_CONTENT".to_string(),
            certifications_section(&content.certifications),
        ),
    ])
}

pub fn summary_section(points: &[Value]) -> String {
    points
        .iter()
        .map(flatten)
        .filter(|point| !point.trim().is_empty())
        .map(|point| format!("\\resumeItem{{{}}}", point))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalise to `Category: a, b | Category: c` before splitting
fn skills_text(skills: &Value) -> String {
    match skills {
        Value::Object(map) => map
            .iter()
            .map(|(category, values)| {
                let values = match values {
                    Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(", "),
                    other => plain(other),
                };
                format!("{}: {}", category, values)
            })
            .collect::<Vec<_>>()
            .join(" | "),
        Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(" | "),
        other => plain(other),
    }
}

pub fn skills_section(skills: &Value) -> String {
    skills_text(skills)
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once(':') {
            Some((category, values)) => format!(
                "\\textbf{{{}}}{{: {}}} \\\\",
                escape(category.trim()),
                escape(values.trim())
            ),
            None => format!("\\textbf{{Key Skills}}{{: {}}} \\\\", escape(part)),
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

fn project_text(project: &Value) -> String {
    let text = match project {
        Value::Object(map) if !map.is_empty() => {
            let titled = TITLE_KEYS.iter().find_map(|key| map.get(*key)).and_then(|title| {
                DESCRIPTION_KEYS
                    .iter()
                    .find_map(|key| map.get(*key))
                    .map(|description| (plain(title), description))
            });

            match (titled, map.iter().next()) {
                (Some((title, description)), _) => {
                    format!("\\textbf{{{}}}: {}", escape(&title), flatten(description))
                }
                (None, Some((key, value))) if map.len() == 1 => {
                    format!("\\textbf{{{}}}: {}", escape(&capitalize(key)), flatten(value))
                }
                _ => flatten(project),
            }
        }
        other => flatten(other),
    };

    let text = text.replace('\n', " ").trim().to_string();
    match text.strip_prefix("['").and_then(|t| t.strip_suffix("']")) {
        Some(inner) => inner.replace("', '", " "),
        None => text,
    }
}

pub fn projects_section(projects: &[Value]) -> String {
    projects
        .iter()
        .map(project_text)
        .filter(|text| !text.is_empty())
        .map(|text| {
            format!(
                "\\resumeSubheading\n      {{Relevant Project / Experience}}{{}}{{}}{{}}\n      \\resumeItemListStart\n        \\resumeItem{{{}}}\n      \\resumeItemListEnd",
                text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn certifications_section(certifications: &[Value]) -> String {
    certifications
        .iter()
        .map(flatten)
        .filter(|cert| !cert.trim().is_empty())
        .map(|cert| format!("\\item {}", cert))
        .collect::<Vec<_>>()
        .join("\n    ")
}
