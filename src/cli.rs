// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::career_crawler::CareerCrawler;
use crate::console::ConsolePrompter;
use crate::core::{ConfigManager, FsOps};
use crate::job_analysis::classify;
use crate::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "job-scout")]
#[command(about = "Crawl a careers page, score jobs against your profile and tailor resumes")]
pub struct ScoutCli {
    #[command(subcommand)]
    pub command: Option<ScoutCommand>,
}

#[derive(Subcommand)]
pub enum ScoutCommand {
    /// Crawl, score and generate resumes (default)
    Run {
        /// Careers page URL; prompted for when omitted
        #[arg(long)]
        url: Option<String>,
        /// Company name used in prompts and the shortlist
        #[arg(long)]
        company: Option<String>,
        /// Minimum score for a job to be shortlisted
        #[arg(long)]
        min_score: Option<u8>,
        /// Directory holding profile.json and resume_template.tex
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Where resumes and the shortlist report are written
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Crawl a careers page and print the discovered postings as JSON
    Crawl {
        url: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the title filter's verdict for each title
    Classify {
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

pub async fn handle_command(cli: ScoutCli) -> Result<()> {
    let command = cli.command.unwrap_or(ScoutCommand::Run {
        url: None,
        company: None,
        min_score: None,
        data_dir: None,
        output_dir: None,
    });

    match command {
        ScoutCommand::Run {
            url,
            company,
            min_score,
            data_dir,
            output_dir,
        } => {
            let mut config = ConfigManager::load()?;
            if let Some(min_score) = min_score {
                config = config.with_min_score(min_score);
            }
            if let Some(dir) = data_dir {
                config = config.with_data_dir(dir);
            }
            if let Some(dir) = output_dir {
                config = config.with_output_dir(dir);
            }
            config.ensure_directories().await?;

            let mut pipeline = Pipeline::new(config, ConsolePrompter, company).await?;
            pipeline.run(url).await
        }

        ScoutCommand::Crawl { url, output } => {
            let config = ConfigManager::load_without_llm()?;
            let jobs = CareerCrawler::new(config.crawler).crawl(&url).await;
            info!("Crawl of {} returned {} jobs", url, jobs.len());

            match output {
                Some(path) => {
                    FsOps::write_json(&path, &jobs).await?;
                    println!("✅ {} jobs written to {}", jobs.len(), path.display());
                }
                None => {
                    let json = serde_json::to_string_pretty(&jobs)
                        .context("Failed to serialize crawl results")?;
                    println!("{}", json);
                }
            }
            Ok(())
        }

        ScoutCommand::Classify { titles } => {
            for title in titles {
                let verdict = classify(&title);
                let icon = if verdict.accepted { "✅" } else { "🔴" };
                println!("{} {:<50} {}", icon, title, verdict.reason);
            }
            Ok(())
        }
    }
}
