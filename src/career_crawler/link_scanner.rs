// src/career_crawler/link_scanner.rs
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::types::JobPosting;
use crate::utils::{clean_text, job_id_from_url};

const MIN_LINK_TEXT_CHARS: usize = 5;
const JOB_URL_HINTS: &[&str] = &["/job/", "/jobs/", "/career/", "req-", "gh_jid="];

/// Anchor tags that look like individual job postings
pub fn scan_links(html: &str, page_url: &str) -> Vec<JobPosting> {
    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(e) => {
            debug!("Cannot resolve links against {}: {}", page_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&anchors)
        .filter_map(|anchor| {
            let text = clean_text(&anchor.text().collect::<Vec<_>>().join(" "));
            if text.chars().count() < MIN_LINK_TEXT_CHARS {
                return None;
            }

            let href = anchor.value().attr("href")?;
            let full_url = base.join(href.trim()).ok()?.to_string();

            let lower = full_url.to_lowercase();
            if !JOB_URL_HINTS.iter().any(|hint| lower.contains(hint)) {
                return None;
            }

            let id = job_id_from_url(&full_url).unwrap_or_else(|| "N_A".to_string());
            Some(JobPosting::new(id, text, full_url))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <nav><a href="/about">About us and our mission</a></nav>
          <ul>
            <li><a href="/job/4411-platform-engineer">Platform
                Engineer</a></li>
            <li><a href="https://jobs.example.com/careers/req-9902">Data Analyst</a></li>
            <li><a href="/job/12">QA</a></li>
            <li><a href="openings/REQ-551">  SDET Automation </a></li>
            <li><a>No href at all</a></li>
          </ul>
        </body></html>
    "#;

    #[test]
    fn test_scan_links() {
        let jobs = scan_links(PAGE, "https://careers.example.com/search?q=eng");

        let urls: Vec<&str> = jobs.iter().map(|j| j.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://careers.example.com/job/4411-platform-engineer",
                "https://jobs.example.com/careers/req-9902",
                "https://careers.example.com/openings/REQ-551",
            ]
        );

        assert_eq!(jobs[0].title, "Platform Engineer");
        assert_eq!(jobs[0].id, "4411");
        assert_eq!(jobs[2].title, "SDET Automation");
        assert!(jobs.iter().all(|j| j.raw_content.is_none()));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(scan_links(PAGE, "not a url").is_empty());
    }
}
