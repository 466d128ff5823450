// tests/common/mod.rs

//! Shared utilities for integration tests.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub mod fixtures;

/// Create a temporary test directory
pub fn test_dir() -> Result<TempDir> {
    tempfile::tempdir().map_err(|e| anyhow::anyhow!("Failed to create temp dir: {}", e))
}

/// Write a `.env` file with the given content, returning its path.
pub fn write_env(dir: &Path, content: &str) -> Result<std::path::PathBuf> {
    let path = dir.join(".env");
    fs::write(&path, content).map_err(|e| anyhow::anyhow!("Failed to write .env: {}", e))?;
    Ok(path)
}
