// src/career_crawler/browser.rs
//! Headless Chromium session scoped to a single crawl or fetch

use anyhow::{anyhow, Context, Result};
use headless_chrome::protocol::cdp::Network::events::ResponseReceivedEventParams;
use headless_chrome::protocol::cdp::Network::GetResponseBodyReturnObject;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config_manager::CrawlerConfig;

const SNIFFER_NAME: &str = "job-api-sniffer";

#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub url: String,
    pub body: String,
}

/// Shared sink the response listener writes into
pub type CaptureSink = Arc<Mutex<Vec<CapturedResponse>>>;

/// Owns the Chromium process; dropping the session kills it
pub struct BrowserSession {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    pub fn launch(config: &CrawlerConfig) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((config.window_width, config.window_height)))
            .idle_browser_timeout(Duration::from_secs(config.page_timeout_seconds * 3))
            .build()
            .map_err(|e| anyhow!("Invalid browser launch options: {}", e))?;

        let browser = Browser::new(options).context("Failed to launch headless Chromium")?;
        let tab = browser.new_tab().context("Failed to open browser tab")?;

        debug!("Browser session started");
        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    /// Install a listener that keeps the text body of every response
    /// accepted by `accept(url, mime_type)`. Must run before navigation.
    pub fn capture_responses<F>(&self, accept: F) -> Result<CaptureSink>
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        let captured: CaptureSink = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);

        self.tab
            .register_response_handling(
                SNIFFER_NAME,
                Box::new(
                    move |event: ResponseReceivedEventParams,
                          fetch_body: &dyn Fn() -> Result<GetResponseBodyReturnObject>| {
                        let url = event.response.url;
                        if !accept(&url, &event.response.mime_type) {
                            return;
                        }

                        match fetch_body() {
                            Ok(body) if !body.base_64_encoded => {
                                if let Ok(mut responses) = sink.lock() {
                                    responses.push(CapturedResponse {
                                        url,
                                        body: body.body,
                                    });
                                }
                            }
                            Ok(_) => debug!("Skipping binary response body from {}", url),
                            Err(e) => debug!("Could not read response body from {}: {}", url, e),
                        }
                    },
                ),
            )
            .context("Failed to install response listener")?;

        Ok(captured)
    }

    pub fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        info!("Navigating to {}", url);
        self.tab.set_default_timeout(timeout);
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?
            .wait_until_navigated()
            .with_context(|| format!("Page did not finish loading: {}", url))?;
        Ok(())
    }

    /// Scroll down repeatedly to trigger lazy loading
    pub fn scroll(&self, rounds: u32, step_px: u32, pause: Duration) -> Result<()> {
        let script = format!("window.scrollBy(0, {})", step_px);
        for round in 1..=rounds {
            self.tab
                .evaluate(&script, false)
                .with_context(|| format!("Scroll round {} failed", round))?;
            std::thread::sleep(pause);
        }
        Ok(())
    }

    pub fn html(&self) -> Result<String> {
        self.tab.get_content().context("Failed to read page HTML")
    }

    /// Rendered visible text of `<body>`
    pub fn body_text(&self) -> Result<String> {
        self.tab
            .find_element("body")
            .context("Page has no body element")?
            .get_inner_text()
            .context("Failed to read body text")
    }

    pub fn close(self) {
        if let Err(e) = self.tab.close_target() {
            debug!("Tab close failed: {}", e);
        }
        debug!("Browser session closed");
    }
}
