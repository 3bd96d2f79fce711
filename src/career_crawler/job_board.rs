// src/career_crawler/job_board.rs
use std::collections::HashMap;

use crate::types::JobPosting;

/// Postings keyed by absolute URL, in discovery order
#[derive(Debug, Default)]
pub struct JobBoard {
    order: Vec<String>,
    jobs: HashMap<String, JobPosting>,
}

impl JobBoard {
    /// Adds a posting. On a URL clash the record with more inline content
    /// wins and keeps the original position. Returns true if anything changed.
    pub fn insert(&mut self, posting: JobPosting) -> bool {
        match self.jobs.get_mut(&posting.url) {
            Some(existing) => {
                if posting.content_len() > existing.content_len() {
                    *existing = posting;
                    true
                } else {
                    false
                }
            }
            None => {
                self.order.push(posting.url.clone());
                self.jobs.insert(posting.url.clone(), posting);
                true
            }
        }
    }

    pub fn extend(&mut self, postings: impl IntoIterator<Item = JobPosting>) {
        for posting in postings {
            self.insert(posting);
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_postings(mut self) -> Vec<JobPosting> {
        self.order
            .iter()
            .filter_map(|url| self.jobs.remove(url))
            .collect()
    }
}
