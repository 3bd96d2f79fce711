// src/core/config_manager.rs
//! Unified configuration management - environment, `.env` and optional `job_scout.toml`

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_LLM_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const SETTINGS_FILE: &str = "job_scout.toml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub llm: LlmConfig,
    pub crawler: CrawlerConfig,
    pub pacing: PacingConfig,
    pub candidate: CandidateConfig,
    pub min_score: u8,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Location keywords a sniffed job must mention; empty keeps everything
    pub locations: Vec<String>,
    pub scroll_rounds: u32,
    pub scroll_step_px: u32,
    pub scroll_pause_ms: u64,
    pub page_timeout_seconds: u64,
    pub fetch_timeout_seconds: u64,
    pub window_width: u32,
    pub window_height: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub between_jobs_ms: u64,
    pub resume_cooldown_ms: u64,
    pub rate_limit_sleep_ms: u64,
    pub retry_pause_ms: u64,
    pub check_in_every: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    pub name: Option<String>,
    /// Seniority sentence embedded in the scoring prompt
    pub experience_summary: String,
}

/// Shape of `job_scout.toml`; every section is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    crawler: Option<CrawlerConfig>,
    pacing: Option<PacingConfig>,
    candidate: Option<CandidateConfig>,
    min_score: Option<u8>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            locations: ["India", "Bangalore", "Hyderabad", "Pune"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scroll_rounds: 5,
            scroll_step_px: 5000,
            scroll_pause_ms: 2000,
            page_timeout_seconds: 60,
            fetch_timeout_seconds: 30,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            between_jobs_ms: 2_000,
            resume_cooldown_ms: 30_000,
            rate_limit_sleep_ms: 30_000,
            retry_pause_ms: 2_000,
            check_in_every: 5,
        }
    }
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            name: None,
            experience_summary: "Early career, roughly 1-2 years of hands-on experience".to_string(),
        }
    }
}

impl PacingConfig {
    pub fn between_jobs(&self) -> Duration {
        Duration::from_millis(self.between_jobs_ms)
    }

    pub fn resume_cooldown(&self) -> Duration {
        Duration::from_millis(self.resume_cooldown_ms)
    }

    pub fn rate_limit_sleep(&self) -> Duration {
        Duration::from_millis(self.rate_limit_sleep_ms)
    }

    pub fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.retry_pause_ms)
    }
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let mut config = Self::load_without_llm()?;
        config.llm = Self::load_llm()?;
        Ok(config)
    }

    /// `.env`, directories and `job_scout.toml`, without requiring an API key.
    /// Used by commands that never call the LLM.
    pub fn load_without_llm() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::offline();
        config.environment = Self::load_environment()?;

        let settings = Self::load_settings_file(Path::new(SETTINGS_FILE))?;
        config = config.apply_settings(settings);

        if let Ok(name) = std::env::var("CANDIDATE_NAME") {
            config.candidate.name = Some(name);
        }
        Ok(config)
    }

    fn apply_settings(mut self, settings: SettingsFile) -> Self {
        if let Some(crawler) = settings.crawler {
            self.crawler = crawler;
        }
        if let Some(pacing) = settings.pacing {
            self.pacing = pacing;
        }
        if let Some(candidate) = settings.candidate {
            self.candidate = candidate;
        }
        match settings.min_score {
            Some(min_score) => self.with_min_score(min_score),
            None => self,
        }
    }

    /// Built-in defaults with no file or env lookups
    pub fn offline() -> Self {
        Self {
            environment: EnvironmentConfig {
                data_path: PathBuf::from("data"),
                output_path: PathBuf::from("output"),
            },
            llm: LlmConfig {
                api_url: DEFAULT_LLM_URL.to_string(),
                api_key: String::new(),
                model: DEFAULT_MODEL.to_string(),
                timeout_seconds: 60,
            },
            crawler: CrawlerConfig::default(),
            pacing: PacingConfig::default(),
            candidate: CandidateConfig::default(),
            min_score: 50,
        }
    }

    fn load_environment() -> Result<EnvironmentConfig> {
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;

        let data_path = std::env::var("JOB_SCOUT_DATA_DIR").unwrap_or_else(|_| "data".to_string());
        let output_path =
            std::env::var("JOB_SCOUT_OUTPUT_DIR").unwrap_or_else(|_| "output".to_string());

        Ok(EnvironmentConfig {
            data_path: resolve_path(&base_dir, Path::new(&data_path)),
            output_path: resolve_path(&base_dir, Path::new(&output_path)),
        })
    }

    fn load_llm() -> Result<LlmConfig> {
        let api_key = std::env::var("GROQ_API_KEY")
            .context("Required environment variable 'GROQ_API_KEY' is not set")?;
        let model = std::env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_url = std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_LLM_URL.to_string());

        info!("LLM model: {} ({})", model, api_url);

        Ok(LlmConfig {
            api_url,
            api_key,
            model,
            timeout_seconds: 60,
        })
    }

    fn load_settings_file(path: &Path) -> Result<SettingsFile> {
        if !path.exists() {
            return Ok(SettingsFile::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let settings = parse_settings(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.environment.output_path = dir;
        self
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.environment.data_path = dir;
        self
    }

    pub fn with_min_score(mut self, min_score: u8) -> Self {
        self.min_score = min_score.min(100);
        self
    }

    pub fn profile_path(&self) -> PathBuf {
        self.environment.data_path.join("profile.json")
    }

    pub fn template_path(&self) -> PathBuf {
        self.environment.data_path.join("resume_template.tex")
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.environment.output_path).await
    }
}

fn parse_settings(content: &str) -> Result<SettingsFile> {
    toml::from_str(content).context("Invalid job_scout.toml")
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
