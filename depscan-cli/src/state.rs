use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$DEPSCAN_HOME`, else `~/.depscan`
pub fn depscan_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("DEPSCAN_HOME") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".depscan"))
}

pub fn ensure_depscan_home() -> Result<PathBuf> {
    let dir = depscan_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
