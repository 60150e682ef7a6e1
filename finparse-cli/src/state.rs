use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn finparse_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".finparse"))
}

pub fn ensure_finparse_home() -> Result<PathBuf> {
    let dir = finparse_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Output directory, created on demand.
pub fn ensure_output_dir(dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}
