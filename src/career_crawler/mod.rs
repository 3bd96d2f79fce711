// src/career_crawler/mod.rs
//! Discovery of job postings on careers pages of unknown structure

pub mod browser;
pub mod crawler;
pub mod job_board;
pub mod job_fetcher;
pub mod link_scanner;
pub mod network_sniffer;

pub use crawler::CareerCrawler;
pub use job_board::JobBoard;
pub use job_fetcher::JobFetcher;
