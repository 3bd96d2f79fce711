// src/career_crawler/network_sniffer.rs
//! Recognises job-list API responses seen by the browser and turns them into postings

use regex::Regex;
use scraper::Html;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::JobPosting;
use crate::utils::{clean_text, job_id_from_url};

/// Something that still reads as an element after one round of decoding
static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[a-zA-Z][^<>]*>").expect("markup pattern is valid"));

const API_URL_HINTS: &[&str] = &["jobs", "search", "greenhouse"];
const URL_KEYS: &[&str] = &["absolute_url", "url", "hosted_url", "hostedUrl"];

/// Heuristic for background responses worth parsing
pub fn is_job_api(url: &str, mime_type: &str) -> bool {
    mime_type.contains("json") && API_URL_HINTS.iter().any(|hint| url.contains(hint))
}

/// Jobs from a sniffed body. The list is either the root array or the
/// root object's `jobs` array. Entries must mention one of `locations`
/// unless that list is empty.
pub fn extract_jobs(body: &str, locations: &[String]) -> Vec<JobPosting> {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            debug!("Sniffed body is not JSON: {}", e);
            return Vec::new();
        }
    };

    let entries = match &data {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("jobs") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    entries
        .iter()
        .filter(|entry| matches_location(entry, locations))
        .filter_map(job_from_entry)
        .collect()
}

fn matches_location(entry: &Value, locations: &[String]) -> bool {
    if locations.is_empty() {
        return true;
    }

    let location_text = format!(
        "{}{}",
        stringify(entry.get("locations")),
        stringify(entry.get("location"))
    );
    locations
        .iter()
        .any(|keyword| location_text.contains(keyword.as_str()))
}

fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn job_from_entry(entry: &Value) -> Option<JobPosting> {
    let url = URL_KEYS
        .iter()
        .filter_map(|key| entry.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|url| !url.is_empty())?;

    let title = entry
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Unknown Role");

    let id = match entry.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => job_id_from_url(url).unwrap_or_else(|| "N_A".to_string()),
    };

    let content = entry
        .get("content")
        .and_then(Value::as_str)
        .map(strip_html)
        .unwrap_or_default();

    Some(JobPosting::new(id, title, url).with_content(content))
}

/// Visible text of an HTML fragment. Boards that escape their markup
/// (`&lt;p&gt;...`) come out of the first parse as markup again, so they get
/// a second one. A bare `&lt; 3 years` survives as text.
pub fn strip_html(html: &str) -> String {
    let text = fragment_text(html);
    if MARKUP_RE.is_match(&text) {
        fragment_text(&text)
    } else {
        text
    }
}

fn fragment_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    clean_text(&fragment.root_element().text().collect::<Vec<_>>().join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn india() -> Vec<String> {
        vec!["India".to_string(), "Pune".to_string()]
    }

    #[test]
    fn test_is_job_api() {
        assert!(is_job_api("https://api.x.io/v1/jobs?page=2", "application/json"));
        assert!(is_job_api("https://boards-api.greenhouse.io/v1/boards/acme", "application/json; charset=utf-8"));
        assert!(!is_job_api("https://api.x.io/v1/jobs", "text/html"));
        assert!(!is_job_api("https://x.io/config", "application/json"));
    }

    #[test]
    fn test_jobs_object_shape() {
        let body = r#"{
            "jobs": [
                {"id": 11, "title": "Backend Engineer", "absolute_url": "https://x.io/job/11",
                 "location": {"name": "Pune, India"}, "content": "&lt;p&gt;Build &amp;amp; ship APIs&lt;/p&gt;"},
                {"id": 12, "title": "Sales Lead", "absolute_url": "https://x.io/job/12",
                 "location": {"name": "Berlin, Germany"}}
            ]
        }"#;

        let jobs = extract_jobs(body, &india());
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "11");
        assert_eq!(jobs[0].title, "Backend Engineer");
        assert_eq!(jobs[0].raw_content.as_deref(), Some("Build & ship APIs"));
    }

    #[test]
    fn test_root_array_and_locations_list() {
        let body = r#"[
            {"title": "SRE", "url": "https://x.io/careers/req-778", "locations": ["Remote", "Bangalore, India"]},
            {"title": "QA", "hostedUrl": "https://jobs.lever.co/x/abc", "locations": ["Pune"]}
        ]"#;

        let jobs = extract_jobs(body, &india());
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, "778");
        assert_eq!(jobs[0].raw_content, None);
        assert_eq!(jobs[1].url, "https://jobs.lever.co/x/abc");
        assert_eq!(jobs[1].id, "N_A");
    }

    #[test]
    fn test_empty_location_filter_keeps_all() {
        let body = r#"{"jobs": [{"title": "Dev", "absolute_url": "https://x.io/job/1"}]}"#;
        assert_eq!(extract_jobs(body, &[]).len(), 1);
        assert!(extract_jobs(body, &india()).is_empty());
    }

    #[test]
    fn test_entries_without_url_dropped() {
        let body = r#"{"jobs": [{"title": "Dev", "location": "India"}]}"#;
        assert!(extract_jobs(body, &india()).is_empty());
    }

    #[test]
    fn test_unusable_bodies() {
        assert!(extract_jobs("not json", &[]).is_empty());
        assert!(extract_jobs(r#"{"results": []}"#, &[]).is_empty());
        assert!(extract_jobs("42", &[]).is_empty());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_html("a &#39;b&#x27; c"), "a 'b' c");
        assert_eq!(strip_html("plain"), "plain");
        assert_eq!(strip_html("<ul><li>Rust</li><li>Go</li></ul>"), "Rust Go");
    }

    #[test]
    fn test_escaped_comparisons_kept_as_text() {
        assert_eq!(
            strip_html("<p>Experience &lt; 3 years, budget &gt; 10 LPA, Rust</p>"),
            "Experience < 3 years, budget > 10 LPA, Rust"
        );
        assert_eq!(strip_html("2-4 yrs &amp; &lt;5 on-call/month"), "2-4 yrs & <5 on-call/month");
    }

    #[test]
    fn test_double_escaped_markup() {
        assert_eq!(
            strip_html("&lt;p&gt;Need &amp;lt; 3 years&lt;/p&gt;&lt;ul&gt;&lt;li&gt;Kafka&lt;/li&gt;&lt;/ul&gt;"),
            "Need < 3 years Kafka"
        );
    }
}
