// src/pipeline.rs
//! Crawl, audit and score, then tailor resumes for the best matches

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::career_crawler::{CareerCrawler, JobFetcher};
use crate::console::Prompter;
use crate::core::{ConfigManager, FsOps, LlmClient};
use crate::job_analysis::{classify, JobAnalyzer, ResumeTailor};
use crate::resume::ResumeBuilder;
use crate::types::{CandidateProfile, JobPosting, ScoringResult, ShortlistReport};
use crate::utils::{company_from_url, truncate_chars};

pub const TOP_JOBS_SHOWN: usize = 10;
pub const MIN_TEXT_CHARS: usize = 100;
const JOB_ID_TITLE_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Strong,
    Partial,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Strong,
            50..=79 => Self::Partial,
            _ => Self::Weak,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Strong => "🟢",
            Self::Partial => "🟡",
            Self::Weak => "🔴",
        }
    }
}

/// Where the scoring loop gets a posting's text
#[allow(async_fn_in_trait)]
pub trait JobTextSource {
    async fn job_text(&self, job: &JobPosting) -> String;
}

/// Scores posting text against the candidate
#[allow(async_fn_in_trait)]
pub trait JobScorer {
    async fn analyze(&self, job_text: &str, title: &str) -> ScoringResult;
}

impl JobTextSource for JobFetcher {
    async fn job_text(&self, job: &JobPosting) -> String {
        JobFetcher::job_text(self, job).await
    }
}

impl JobScorer for JobAnalyzer {
    async fn analyze(&self, job_text: &str, title: &str) -> ScoringResult {
        JobAnalyzer::analyze(self, job_text, title).await
    }
}

pub struct Pipeline<P: Prompter, F: JobTextSource = JobFetcher, A: JobScorer = JobAnalyzer> {
    config: ConfigManager,
    crawler: CareerCrawler,
    fetcher: F,
    analyzer: A,
    tailor: ResumeTailor,
    builder: ResumeBuilder,
    prompter: P,
    company: Option<String>,
}

impl<P: Prompter> Pipeline<P> {
    pub async fn new(config: ConfigManager, prompter: P, company: Option<String>) -> Result<Self> {
        let llm = Arc::new(LlmClient::new(&config.llm, config.pacing.clone())?);
        let profile_path = config.profile_path();

        let profile = CandidateProfile::load(&profile_path).await;
        let candidate = candidate_name(config.candidate.name.as_deref(), profile.name());

        println!("🤖 Agent initialized using model: {}", llm.model());
        info!("Candidate: {}, profile: {}", candidate, profile_path.display());

        Ok(Self {
            crawler: CareerCrawler::new(config.crawler.clone()),
            fetcher: JobFetcher::new(config.crawler.clone()),
            analyzer: JobAnalyzer::new(
                llm.clone(),
                profile_path.clone(),
                config.candidate.experience_summary.clone(),
            ),
            tailor: ResumeTailor::new(llm, profile_path),
            builder: ResumeBuilder::new(
                config.template_path(),
                config.environment.output_path.clone(),
                &candidate,
            ),
            config,
            prompter,
            company,
        })
    }
}

impl<P: Prompter, F: JobTextSource, A: JobScorer> Pipeline<P, F, A> {
    pub async fn run(&mut self, url: Option<String>) -> Result<()> {
        println!("\n--- 🤖 JOB AGENT ---");
        let url = match url {
            Some(url) => url,
            None => self.prompter.ask_url()?,
        };

        let company = self
            .company
            .clone()
            .or_else(|| company_from_url(&url));
        info!("Target {} (company: {:?})", url, company);

        println!("\n🔹 STEP 1: Scanning Career Page...");
        let jobs = self.crawler.crawl(&url).await;
        println!("   ✅ Total Jobs Found: {}", jobs.len());
        if jobs.is_empty() {
            println!("   No jobs found. Nothing to do.");
            return Ok(());
        }

        println!("\n🔹 STEP 2: Auditing & Scoring {} Jobs...", jobs.len());
        let kept = self.score_jobs(jobs, company.as_deref()).await?;
        let shortlist = rank_shortlist(kept);

        self.write_report(&url, &shortlist).await?;

        println!("\n🔹 STEP 3: Generating Resumes...");
        for (idx, job) in shortlist.iter().take(TOP_JOBS_SHOWN).enumerate() {
            println!("{}. [{}%] {}", idx + 1, job.match_score, job.title);
        }

        let limit = self.prompter.ask_resume_count()?;
        self.generate_resumes(&shortlist, limit).await;

        Ok(())
    }

    async fn score_jobs(
        &mut self,
        jobs: Vec<JobPosting>,
        company: Option<&str>,
    ) -> Result<Vec<JobPosting>> {
        let total = jobs.len();
        let mut kept = Vec::new();

        for (i, mut job) in jobs.into_iter().enumerate() {
            let current = i + 1;
            println!("\n[{}/{}] Checking: {}", current, total, job.title);
            println!("      🔗 {}", job.url);

            let verdict = classify(&job.title);
            if !verdict.accepted {
                println!("      🔴 Skipped: {}", verdict.reason);
                continue;
            }

            let text = self.fetcher.job_text(&job).await;
            if text.chars().count() < MIN_TEXT_CHARS {
                println!("      ⚠️ Content Empty");
                continue;
            }

            let result = self.analyzer.analyze(&text, &job.title).await;
            println!(
                "      {} SCORE: {}%",
                ScoreBand::from_score(result.score).icon(),
                result.score
            );
            println!("      📝 REASON: {}", result.justification);

            if result.score >= self.config.min_score {
                let company = company
                    .map(str::to_string)
                    .or_else(|| result.company_name.clone())
                    .unwrap_or_else(|| "Unknown".to_string());
                job.enrich(text, &result, &company);
                kept.push(job);
            }

            tokio::time::sleep(self.config.pacing.between_jobs()).await;

            if check_in_due(current, self.config.pacing.check_in_every) {
                println!("\n--- ⏳ Processed {} jobs. ---", current);
                if !self.prompter.ask_continue()? {
                    info!("Operator stopped scoring after {} jobs", current);
                    break;
                }
            }
        }

        info!("Kept {} of {} jobs", kept.len(), total);
        Ok(kept)
    }

    async fn generate_resumes(&self, shortlist: &[JobPosting], limit: usize) {
        let cooldown = self.config.pacing.resume_cooldown();

        for (idx, job) in shortlist.iter().take(limit).enumerate() {
            println!("   Writing resume for: {}", job.title);
            println!("      🔗 Apply Link: {}", job.url);

            match self.tailor.generate(job).await {
                Some(content) => match self.builder.build(&resume_job_id(&job.title, idx), &content).await {
                    Ok(path) => println!("      ✅ Resume generated: {}", path.display()),
                    Err(e) => {
                        warn!("Resume build failed for {}: {:#}", job.title, e);
                        println!("      ❌ Builder Error: {:#}", e);
                    }
                },
                None => println!("      ❌ Failed to generate resume data."),
            }

            println!("      ⏳ Cooling down {}s...", cooldown.as_secs());
            tokio::time::sleep(cooldown).await;
        }
    }

    async fn write_report(&self, url: &str, shortlist: &[JobPosting]) -> Result<()> {
        let generated_at = Utc::now();
        let path = report_path(&self.config.environment.output_path, generated_at);
        let report = ShortlistReport {
            source_url: url,
            generated_at,
            jobs: shortlist,
        };

        FsOps::write_json(&path, &report)
            .await
            .context("Failed to write shortlist report")?;
        println!("   📄 Shortlist saved: {}", path.display());
        Ok(())
    }
}

/// Highest score first; equal scores keep discovery order
pub fn rank_shortlist(mut jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    jobs.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    jobs
}

pub fn check_in_due(processed: usize, every: usize) -> bool {
    every > 0 && processed % every == 0
}

pub fn resume_job_id(title: &str, idx: usize) -> String {
    format!("{}_{}", truncate_chars(title, JOB_ID_TITLE_CHARS), idx + 1)
}

pub fn candidate_name(configured: Option<&str>, from_profile: Option<&str>) -> String {
    [configured, from_profile]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or("Candidate")
        .to_string()
}

pub fn report_path(output_dir: &std::path::Path, at: chrono::DateTime<Utc>) -> PathBuf {
    output_dir.join(format!("shortlist_{}.json", at.format("%Y%m%d_%H%M%S")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::ScriptedPrompter;
    use crate::core::config_manager::PacingConfig;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct CannedText(HashMap<&'static str, String>);

    impl JobTextSource for CannedText {
        async fn job_text(&self, job: &JobPosting) -> String {
            self.0.get(job.id.as_str()).cloned().unwrap_or_default()
        }
    }

    struct CannedScores {
        scores: HashMap<&'static str, u8>,
        company_name: Option<String>,
        analyzed: RefCell<Vec<String>>,
    }

    impl CannedScores {
        fn new(scores: &[(&'static str, u8)], company_name: Option<&str>) -> Self {
            Self {
                scores: scores.iter().copied().collect(),
                company_name: company_name.map(str::to_string),
                analyzed: RefCell::new(Vec::new()),
            }
        }
    }

    impl JobScorer for CannedScores {
        async fn analyze(&self, _job_text: &str, title: &str) -> ScoringResult {
            self.analyzed.borrow_mut().push(title.to_string());
            ScoringResult {
                score: self.scores.get(title).copied().unwrap_or(0),
                company_name: self.company_name.clone(),
                ..ScoringResult::failed()
            }
        }
    }

    fn scoring_pipeline(
        texts: &[(&'static str, String)],
        scorer: CannedScores,
        answers: &[&str],
        check_in_every: usize,
    ) -> Pipeline<ScriptedPrompter, CannedText, CannedScores> {
        let mut config = ConfigManager::offline();
        config.pacing = PacingConfig {
            between_jobs_ms: 0,
            check_in_every,
            ..PacingConfig::default()
        };
        let llm = Arc::new(LlmClient::new(&config.llm, config.pacing.clone()).unwrap());

        Pipeline {
            crawler: CareerCrawler::new(config.crawler.clone()),
            fetcher: CannedText(texts.iter().cloned().collect()),
            analyzer: scorer,
            tailor: ResumeTailor::new(llm, config.profile_path()),
            builder: ResumeBuilder::new(
                config.template_path(),
                config.environment.output_path.clone(),
                "Test",
            ),
            config,
            prompter: ScriptedPrompter::new(answers),
            company: None,
        }
    }

    fn description(words: &str) -> String {
        format!("{} ", words).repeat(40)
    }

    fn scored(id: &str, score: u8) -> JobPosting {
        JobPosting {
            match_score: score,
            ..JobPosting::new(id, format!("Job {}", id), format!("https://x.io/job/{}", id))
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Partial);
        assert_eq!(ScoreBand::from_score(50), ScoreBand::Partial);
        assert_eq!(ScoreBand::from_score(49), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_score(0).icon(), "🔴");
    }

    #[test]
    fn test_rank_is_stable() {
        let ranked = rank_shortlist(vec![
            scored("a", 60),
            scored("b", 90),
            scored("c", 60),
            scored("d", 75),
        ]);
        let ids: Vec<_> = ranked.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_check_in_cadence() {
        let due: Vec<_> = (1..=12).filter(|n| check_in_due(*n, 5)).collect();
        assert_eq!(due, vec![5, 10]);
        assert!(!check_in_due(5, 0));
    }

    #[test]
    fn test_resume_job_id_truncates_title() {
        assert_eq!(resume_job_id("SRE", 0), "SRE_1");
        let long = "Senior Software Engineer, Platform Infrastructure";
        assert_eq!(resume_job_id(long, 2), "Senior Software Engineer, Plat_3");
    }

    #[test]
    fn test_candidate_name_precedence() {
        assert_eq!(candidate_name(Some("Asha"), Some("Ravi")), "Asha");
        assert_eq!(candidate_name(None, Some(" Ravi ")), "Ravi");
        assert_eq!(candidate_name(Some("  "), Some("Ravi")), "Ravi");
        assert_eq!(candidate_name(Some(""), None), "Candidate");
        assert_eq!(candidate_name(None, None), "Candidate");
    }

    #[test]
    fn test_report_path() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(
            report_path(std::path::Path::new("out"), at),
            PathBuf::from("out/shortlist_20260301_090507.json")
        );
    }

    #[tokio::test]
    async fn test_scoring_loop_filters_and_stops_at_check_in() {
        let jobs = vec![
            JobPosting::new("1", "Director of Engineering", "https://acme.io/job/1"),
            JobPosting::new("2", "Backend Engineer", "https://acme.io/job/2"),
            JobPosting::new("3", "Data Engineer", "https://acme.io/job/3"),
            JobPosting::new("4", "Software Developer", "https://acme.io/job/4"),
            JobPosting::new("5", "Platform Engineer", "https://acme.io/job/5"),
            JobPosting::new("6", "Rust Developer", "https://acme.io/job/6"),
        ];
        let texts = [
            ("1", description("lead the org")),
            ("2", "Apply now".to_string()),
            ("3", description("spark pipelines")),
            ("4", description("java monolith")),
            ("5", description("kubernetes platform")),
            ("6", description("tokio services")),
        ];
        let scorer = CannedScores::new(
            &[
                ("Data Engineer", 90),
                ("Software Developer", 40),
                ("Platform Engineer", 60),
                ("Rust Developer", 95),
            ],
            Some("Page Co"),
        );
        let mut pipeline = scoring_pipeline(&texts, scorer, &["stop"], 5);

        let kept = pipeline.score_jobs(jobs, Some("Acme")).await.unwrap();

        let ids: Vec<_> = kept.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "5"]);
        assert_eq!(kept[0].match_score, 90);
        assert_eq!(kept[1].match_score, 60);
        assert!(kept.iter().all(|j| j.company == "Acme"));
        assert_eq!(kept[0].fetched_description, description("spark pipelines"));
        assert_eq!(
            *pipeline.analyzer.analyzed.borrow(),
            vec!["Data Engineer", "Software Developer", "Platform Engineer"]
        );
        assert_eq!(pipeline.prompter.prompts.len(), 1);
    }

    #[tokio::test]
    async fn test_company_falls_back_to_analysis_then_unknown() {
        let jobs = vec![JobPosting::new("1", "Backend Engineer", "https://x.io/job/1")];
        let texts = [("1", description("grpc services"))];

        let scorer = CannedScores::new(&[("Backend Engineer", 70)], Some("Globex"));
        let mut pipeline = scoring_pipeline(&texts, scorer, &[], 0);
        let kept = pipeline.score_jobs(jobs.clone(), None).await.unwrap();
        assert_eq!(kept[0].company, "Globex");

        let scorer = CannedScores::new(&[("Backend Engineer", 70)], None);
        let mut pipeline = scoring_pipeline(&texts, scorer, &[], 0);
        let kept = pipeline.score_jobs(jobs, None).await.unwrap();
        assert_eq!(kept[0].company, "Unknown");
        assert!(pipeline.prompter.prompts.is_empty());
    }
}
