// src/template_processor.rs
use anyhow::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::FsOps;

/// Text template with `{{NAME}}` placeholders
pub struct TemplateProcessor {
    template_path: PathBuf,
}

impl TemplateProcessor {
    pub fn new(template_path: PathBuf) -> Self {
        Self { template_path }
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn process_variables(content: &str, vars: &HashMap<String, String>) -> String {
        vars.iter().fold(content.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{{{}}}}}", key), value)
        })
    }

    /// Read the template fresh and substitute every variable
    pub async fn render(&self, variables: &HashMap<String, String>) -> Result<String> {
        let template_content = FsOps::read_file_safe(&self.template_path).await?;
        Ok(Self::process_variables(&template_content, variables))
    }
}
