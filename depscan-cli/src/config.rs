use anyhow::{Context, Result};
use depscan_finance::ParseOptions;
use depscan_ingest::{ExtractOptions, OcrSettings, ToolPaths};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{depscan_home, ensure_depscan_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrSection,
    pub tools: ToolPaths,
    pub parse: ParseOptions,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSection {
    pub enabled: bool,
    /// tesseract language code(s), e.g. "eng" or "eng+spa"
    pub language: String,
    pub dpi: u32,
    /// Pages with fewer alphanumeric characters than this are OCRed
    pub min_text_chars: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub pretty: bool,
}

impl Default for OcrSection {
    fn default() -> Self {
        let extract = ExtractOptions::default();
        let settings = OcrSettings::default();
        Self {
            enabled: extract.ocr_enabled,
            language: settings.language,
            dpi: settings.dpi,
            min_text_chars: extract.min_text_chars,
        }
    }
}

impl OcrSection {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            ocr_enabled: self.enabled,
            min_text_chars: self.min_text_chars,
        }
    }

    pub fn settings(&self) -> OcrSettings {
        OcrSettings {
            language: self.language.clone(),
            dpi: self.dpi,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(depscan_home()?.join("config.toml"))
}

/// Load `path` (or the default location). A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = render_config(cfg)?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => ensure_depscan_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
