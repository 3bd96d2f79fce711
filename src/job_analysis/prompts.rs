// src/job_analysis/prompts.rs
use crate::utils::truncate_chars;

/// Longest slice of a job description embedded in any prompt
pub const MAX_DESCRIPTION_CHARS: usize = 6000;

pub fn scoring_prompt(title: &str, job_text: &str, profile: &str, experience: &str) -> String {
    format!(
        r#"You are a technical talent matcher comparing one job posting with one candidate.

JOB TITLE: {title}
JOB DESCRIPTION:
{description}

CANDIDATE PROFILE (source of truth):
{profile}

CANDIDATE EXPERIENCE LEVEL: {experience}

Score how relevant this job is for the candidate on a 0-100 scale.

RULES
1. Experience
   - If the job asks for more than 5 years of experience, score 0 when the
     candidate's stack only partially matches. Score 80 or more only when the
     candidate's projects show exactly the requested stack.
   - Senior management roles (Director, VP, Principal) score 0.
2. Evidence
   - Do not stop at the skills list. Look for proof in projects and
     certifications: a cloud requirement is covered by a cloud certification,
     an AI requirement by an AI project, a testing requirement by testing
     skills or tools.
3. Bands
   - 90-100: stack matches, relevant project evidence, experience fits or is
     outweighed by the perfect stack match.
   - 75-89: strong stack match with relevant projects.
   - 50-74: partial match (for example backend but not frontend).
   - below 50: non-technical role or unrelated stack.

OUTPUT
Return a single JSON object and nothing else, no markdown:
{{
  "score": 0,
  "reason": "one short phrase",
  "justification": "two sentences citing projects or certifications",
  "matching_skills": ["skills from the profile that the job asks for"],
  "missing_skills": ["important job skills absent from the profile"],
  "best_projects": ["titles of the 1-2 most relevant profile projects"],
  "recommended_role_type": "short label such as Backend Java or Python/AI"
}}"#,
        title = title,
        description = truncate_chars(job_text, MAX_DESCRIPTION_CHARS),
        profile = profile,
        experience = experience,
    )
}

pub fn resume_prompt(title: &str, company: &str, description: &str, profile: &str) -> String {
    format!(
        r#"You extract resume content from a candidate profile for one target job.

TARGET JOB: {title} at {company}
DESCRIPTION:
{description}

CANDIDATE PROFILE (source of truth, JSON):
{profile}

Select and filter entries from the profile to build a tailored resume.

RULES
1. Only use skills, projects and certifications written in the profile.
   Never invent new ones.
2. Skills: keep the profile skills that the job description asks for.
3. Projects: pick exactly 2 projects from the profile.
4. Certifications: keep only relevant ones. Drop frontend or CSS
   certifications for backend and AI roles, and drop cloud or backend
   certifications for frontend roles. Return [] when none apply.

OUTPUT
Return a single JSON object and nothing else:
{{
  "summary_points": ["point grounded in the profile", "second point", "third point"],
  "skills_summary": "Category: Skill, Skill | Category: Skill, Skill",
  "projects": ["Project title: what was built and why it fits", "Project title: ..."],
  "certifications": ["Certification name"]
}}"#,
        title = title,
        company = company,
        description = truncate_chars(description, MAX_DESCRIPTION_CHARS),
        profile = profile,
    )
}
