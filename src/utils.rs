// src/utils.rs
use url::Url;

/// Hosted job boards that put the company slug in the first path segment
const HOSTED_BOARDS: &[&str] = &[
    "greenhouse",
    "lever",
    "ashby",
    "workday",
    "smartrecruiters",
];

/// Normalize a job identifier for file system usage
pub fn sanitize_job_id(job_id: &str) -> String {
    job_id
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Truncate on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Collapse all whitespace runs to single spaces
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase the first char, leave the rest untouched
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Best-effort company name from a careers page URL
pub fn company_from_url(careers_url: &str) -> Option<String> {
    let url = Url::parse(careers_url).ok()?;
    let host = url.host_str()?.trim_start_matches("www.");

    let slug = if host.ends_with(".myworkdayjobs.com") {
        // acme.wd5.myworkdayjobs.com/en-US/External: the path is locale and site
        host.split('.').next()?.to_string()
    } else if HOSTED_BOARDS.iter().any(|board| host.contains(board)) {
        url.path_segments()?
            .find(|segment| !segment.is_empty())?
            .to_string()
    } else {
        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() >= 2 {
            labels[labels.len() - 2].to_string()
        } else {
            labels.first()?.to_string()
        }
    };

    let name = slug.replace(['-', '_'], " ");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(capitalize(name))
    }
}

/// First run of digits in a URL, used as a fallback job id
pub fn job_id_from_url(url: &str) -> Option<String> {
    let digits: String = url
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
