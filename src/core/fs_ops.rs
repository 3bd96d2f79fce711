// src/core/fs_ops.rs
//! File system operations shared by the resume builder and reports

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::info;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write file, creating parent directories first
    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }

    pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        Self::write_file_safe(path, &content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/out.txt");

        FsOps::write_file_safe(&path, "hello").await.unwrap();

        assert_eq!(FsOps::read_file_safe(&path).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        FsOps::write_json(&path, &serde_json::json!({ "jobs": [1, 2] }))
            .await
            .unwrap();

        let back: serde_json::Value =
            serde_json::from_str(&FsOps::read_file_safe(&path).await.unwrap()).unwrap();
        assert_eq!(back["jobs"][1], 2);
    }

    #[tokio::test]
    async fn test_read_missing_file_has_context() {
        let err = FsOps::read_file_safe(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
