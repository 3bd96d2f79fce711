// src/job_analysis/title_filter.rs
//! Static keyword triage of job titles before any page fetch or LLM call

use serde::Serialize;

/// Checked in order; the first hit decides the reason
const DENY_LIST: &[(&str, &str)] = &[
    ("director", "Too Senior (Director Level)"),
    ("vp ", "Too Senior (VP Level)"),
    ("principal", "Too Senior (Principal Level)"),
    ("manager", "Management Role"),
    ("head of", "Management Role"),
    ("sales", "Non-Tech (Sales)"),
    ("marketing", "Non-Tech (Marketing)"),
    ("account", "Non-Tech (Accounts/Sales)"),
    ("finance", "Non-Tech (Finance)"),
    ("legal", "Non-Tech (Legal)"),
    ("hr ", "Non-Tech (HR)"),
    ("recruiter", "Non-Tech (HR)"),
    ("representative", "Non-Tech (Support/Sales)"),
    ("tax", "Non-Tech (Finance)"),
];

const TECH_KEYWORDS: &[&str] = &[
    "engineer",
    "developer",
    "architect",
    "lead",
    "data",
    "qa",
    "sdet",
    "devops",
    "sre",
    "full stack",
    "backend",
    "frontend",
    "software",
    "technologist",
    "analyst",
    "consultant",
    "scientist",
    "administrator",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TitleVerdict {
    pub accepted: bool,
    pub reason: &'static str,
}

pub fn classify(title: &str) -> TitleVerdict {
    let title = title.to_lowercase();

    if let Some((_, reason)) = DENY_LIST.iter().find(|(keyword, _)| title.contains(keyword)) {
        return TitleVerdict {
            accepted: false,
            reason: *reason,
        };
    }

    if !TECH_KEYWORDS.iter().any(|keyword| title.contains(keyword)) {
        return TitleVerdict {
            accepted: false,
            reason: "Title does not contain Tech keywords",
        };
    }

    TitleVerdict {
        accepted: true,
        reason: "Valid Tech Role",
    }
}
