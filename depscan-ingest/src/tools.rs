//! External command-line tools (poppler-utils, tesseract)

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Command names (or absolute paths) for the tools the extractor shells out to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub pdfinfo: String,
    pub pdftotext: String,
    pub pdftoppm: String,
    pub tesseract: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            pdfinfo: "pdfinfo".to_string(),
            pdftotext: "pdftotext".to_string(),
            pdftoppm: "pdftoppm".to_string(),
            tesseract: "tesseract".to_string(),
        }
    }
}

impl ToolPaths {
    /// (name, resolved path) for every configured tool
    pub fn probe(&self) -> Vec<(&str, Option<PathBuf>)> {
        [&self.pdfinfo, &self.pdftotext, &self.pdftoppm, &self.tesseract]
            .into_iter()
            .map(|t| (t.as_str(), which::which(t).ok()))
            .collect()
    }
}

fn install_hint(tool: &str) -> &'static str {
    if tool.contains("tesseract") {
        "install with: apt install tesseract-ocr / brew install tesseract"
    } else {
        "install with: apt install poppler-utils / brew install poppler"
    }
}

/// Run `tool args...` and return stdout. Non-zero exit is an error.
pub(crate) fn run_tool<I, S>(tool: &str, args: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = which::which(tool).map_err(|_| IngestError::ToolMissing {
        tool: tool.to_string(),
        hint: install_hint(tool),
    })?;

    let mut cmd = Command::new(&bin);
    cmd.args(args);
    debug!(tool, ?cmd, "running");

    let output = cmd.output()?;
    if !output.status.success() {
        return Err(IngestError::ToolFailed {
            tool: tool.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}
