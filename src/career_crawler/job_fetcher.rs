// src/career_crawler/job_fetcher.rs
use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

use super::browser::BrowserSession;
use crate::core::config_manager::CrawlerConfig;
use crate::types::JobPosting;
use crate::utils::{clean_text, truncate_chars};

/// Text shorter than this is treated as "no content"
pub const MIN_CONTENT_CHARS: usize = 100;
pub const MAX_TEXT_CHARS: usize = 6000;

/// Tried in order; ATS-specific containers first, generic ones last
const DESCRIPTION_SELECTORS: &[&str] = &[
    "[data-automation-id='jobPostingDescription']",
    ".job__description",
    "#content .body",
    ".posting-page .section-wrapper",
    ".jobs-description__container",
    ".jobs-box__html-content",
    "[class*='job-description']",
    "[class*='jobDescription']",
    "[class*='description']",
    "[class*='details']",
    "main",
    "article",
];

const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

pub struct JobFetcher {
    config: CrawlerConfig,
}

impl JobFetcher {
    pub fn new(config: CrawlerConfig) -> Self {
        Self { config }
    }

    /// Inline API content when it is substantial, otherwise the job page's
    /// text. Always capped at `MAX_TEXT_CHARS`; failures give "".
    pub async fn job_text(&self, job: &JobPosting) -> String {
        if let Some(content) = job
            .raw_content
            .as_deref()
            .filter(|c| c.chars().count() > MIN_CONTENT_CHARS)
        {
            return truncate_chars(content, MAX_TEXT_CHARS);
        }

        let config = self.config.clone();
        let url = job.url.clone();

        match tokio::task::spawn_blocking(move || fetch_page_text(&config, &url)).await {
            Ok(Ok(text)) => truncate_chars(&text, MAX_TEXT_CHARS),
            Ok(Err(e)) => {
                warn!("Failed to fetch {}: {:#}", job.url, e);
                String::new()
            }
            Err(e) => {
                warn!("Fetch task aborted for {}: {}", job.url, e);
                String::new()
            }
        }
    }
}

fn fetch_page_text(config: &CrawlerConfig, url: &str) -> Result<String> {
    let session = BrowserSession::launch(config)?;
    let text = read_job_page(&session, config, url);
    session.close();
    text
}

fn read_job_page(session: &BrowserSession, config: &CrawlerConfig, url: &str) -> Result<String> {
    session.navigate(url, Duration::from_secs(config.fetch_timeout_seconds))?;
    let html = session.html()?;

    if let Some(description) = extract_description(&html) {
        info!("Extracted job description from selector chain: {}", url);
        return Ok(description);
    }

    warn!("Falling back to whole-page text for {}", url);
    match session.body_text() {
        Ok(text) => Ok(clean_text(&text)),
        Err(_) => Ok(page_text(&html)),
    }
}

/// First description container with enough visible text
pub fn extract_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    DESCRIPTION_SELECTORS.iter().find_map(|selector_str| {
        let selector = Selector::parse(selector_str).ok()?;
        document
            .select(&selector)
            .map(visible_text)
            .find(|text| text.chars().count() > MIN_CONTENT_CHARS)
    })
}

/// Visible text of the whole body, used when no container matches
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(body) = Selector::parse("body") else {
        return String::new();
    };

    document
        .select(&body)
        .next()
        .map(visible_text)
        .unwrap_or_default()
}

fn visible_text(root: ElementRef) -> String {
    let parts: Vec<String> = root
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ElementRef::wrap(ancestor)
                    .map(|el| HIDDEN_TAGS.contains(&el.value().name()))
                    .unwrap_or(false)
            });
            (!hidden).then(|| text.to_string())
        })
        .collect();

    clean_text(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_sentence() -> String {
        "We build distributed systems in Rust and Go for high-volume traffic. ".repeat(3)
    }

    #[test]
    fn test_specific_selector_wins() {
        let html = format!(
            r#"<html><body>
                <div class="job__description"><p>{}</p><script>track()</script></div>
                <main>{}</main>
            </body></html>"#,
            long_sentence(),
            "Other main text ".repeat(20)
        );

        let text = extract_description(&html).unwrap();
        assert!(text.starts_with("We build distributed systems"));
        assert!(!text.contains("track()"));
        assert!(!text.contains("Other main text"));
    }

    #[test]
    fn test_short_containers_skipped() {
        let html = format!(
            r#"<html><body>
                <div class="description">Apply now</div>
                <article>{}</article>
            </body></html>"#,
            long_sentence()
        );

        let text = extract_description(&html).unwrap();
        assert!(text.contains("distributed systems"));
    }

    #[test]
    fn test_no_container_falls_back_to_page_text() {
        let html = r#"<html><head><style>body{}</style></head>
            <body><h1>Engineer</h1><div>Short</div><script>var x = 1;</script></body></html>"#;

        assert_eq!(extract_description(html), None);
        assert_eq!(page_text(html), "Engineer Short");
    }

    #[tokio::test]
    async fn test_inline_content_used_without_browser() {
        let fetcher = JobFetcher::new(CrawlerConfig::default());
        let content = "x".repeat(MAX_TEXT_CHARS + 10);
        let job = JobPosting::new("1", "Dev", "https://x.io/job/1").with_content(content);

        let text = fetcher.job_text(&job).await;
        assert_eq!(text.len(), MAX_TEXT_CHARS);
    }
}
