// src/career_crawler/crawler.rs
//! Hybrid crawl: network sniffing while the page loads and scrolls, then an anchor scan

use std::time::Duration;
use tracing::{info, warn};

use super::browser::{BrowserSession, CapturedResponse};
use super::job_board::JobBoard;
use super::{link_scanner, network_sniffer};
use crate::core::config_manager::CrawlerConfig;
use crate::types::JobPosting;

pub struct CareerCrawler {
    config: CrawlerConfig,
}

impl CareerCrawler {
    pub fn new(config: CrawlerConfig) -> Self {
        Self { config }
    }

    /// Never fails; browser trouble shrinks the result instead
    pub async fn crawl(&self, url: &str) -> Vec<JobPosting> {
        let config = self.config.clone();
        let target = url.to_string();

        match tokio::task::spawn_blocking(move || crawl_blocking(&config, &target)).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Crawl task aborted: {}", e);
                Vec::new()
            }
        }
    }
}

fn crawl_blocking(config: &CrawlerConfig, url: &str) -> Vec<JobPosting> {
    let session = match BrowserSession::launch(config) {
        Ok(session) => session,
        Err(e) => {
            println!("   ⚠️ Browser failed to start: {:#}", e);
            warn!("Browser launch failed: {:#}", e);
            return Vec::new();
        }
    };

    let sink = match session.capture_responses(network_sniffer::is_job_api) {
        Ok(sink) => Some(sink),
        Err(e) => {
            warn!("Network sniffing disabled: {:#}", e);
            None
        }
    };

    let loaded = session
        .navigate(url, Duration::from_secs(config.page_timeout_seconds))
        .and_then(|_| {
            session.scroll(
                config.scroll_rounds,
                config.scroll_step_px,
                Duration::from_millis(config.scroll_pause_ms),
            )
        });
    if let Err(e) = loaded {
        println!("   ⚠️ Crawl Warning: {:#}", e);
        warn!("Crawl of {} degraded: {:#}", url, e);
    }

    let html = match session.html() {
        Ok(html) => Some(html),
        Err(e) => {
            warn!("No page HTML for link scan: {:#}", e);
            None
        }
    };

    session.close();

    let responses: Vec<CapturedResponse> = match sink {
        Some(sink) => {
            let captured = sink
                .lock()
                .map(|mut r| std::mem::take(&mut *r))
                .unwrap_or_default();
            captured
        }
        None => Vec::new(),
    };

    merge_sources(&responses, html.as_deref(), url, &config.locations)
}

/// API-sniffed records first, then anchor links, keyed by URL
pub fn merge_sources(
    responses: &[CapturedResponse],
    html: Option<&str>,
    page_url: &str,
    locations: &[String],
) -> Vec<JobPosting> {
    let mut board = JobBoard::default();

    for response in responses {
        let jobs = network_sniffer::extract_jobs(&response.body, locations);
        if !jobs.is_empty() {
            println!("      ⚡ Network Sniffer detected {} jobs via API!", jobs.len());
            info!("{} jobs from {}", jobs.len(), response.url);
        }
        board.extend(jobs);
    }

    if let Some(html) = html {
        let before = board.len();
        board.extend(link_scanner::scan_links(html, page_url));
        info!("Link scan added {} jobs", board.len() - before);
    }

    board.into_postings()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_api_records() {
        let responses = vec![CapturedResponse {
            url: "https://api.x.io/jobs".into(),
            body: r#"{"jobs": [{"id": 7, "title": "Backend Engineer",
                "absolute_url": "https://x.io/job/7", "location": "Pune",
                "content": "<p>Design services</p>"}]}"#
                .into(),
        }];
        let html = r#"<a href="/job/7">Backend Engineer (link)</a>
                      <a href="/job/8">Frontend Engineer</a>"#;

        let jobs = merge_sources(&responses, Some(html), "https://x.io/careers", &["Pune".into()]);

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].url, "https://x.io/job/7");
        assert_eq!(jobs[0].raw_content.as_deref(), Some("Design services"));
        assert_eq!(jobs[1].title, "Frontend Engineer");
        assert_eq!(jobs[1].raw_content, None);
    }

    #[test]
    fn test_merge_without_any_source() {
        assert!(merge_sources(&[], None, "https://x.io", &[]).is_empty());
    }
}
