//! Text layer access through poppler's `pdfinfo` / `pdftotext`.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};
use crate::tools::{ToolPaths, run_tool};

/// Per-page access to a PDF's embedded text
pub trait TextLayer {
    fn page_count(&self) -> Result<usize>;

    /// Text of a 1-based page. Empty string for image-only pages.
    fn page_text(&self, page: usize) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct PopplerTextLayer {
    pdf: PathBuf,
    tools: ToolPaths,
}

impl PopplerTextLayer {
    pub fn new(pdf: impl Into<PathBuf>, tools: ToolPaths) -> Self {
        Self {
            pdf: pdf.into(),
            tools,
        }
    }

    pub fn path(&self) -> &Path {
        &self.pdf
    }
}

impl TextLayer for PopplerTextLayer {
    fn page_count(&self) -> Result<usize> {
        let stdout = run_tool(&self.tools.pdfinfo, [self.pdf.as_os_str()])?;
        parse_pdfinfo_pages(&String::from_utf8_lossy(&stdout))
    }

    fn page_text(&self, page: usize) -> Result<String> {
        let page = page.to_string();
        let pdf = self
            .pdf
            .to_str()
            .ok_or_else(|| IngestError::InvalidPath(self.pdf.display().to_string()))?;

        // -layout keeps amount columns on the same line as the description
        let stdout = run_tool(
            &self.tools.pdftotext,
            ["-layout", "-f", page.as_str(), "-l", page.as_str(), pdf, "-"],
        )?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Pull the `Pages:` value out of `pdfinfo` output
pub fn parse_pdfinfo_pages(stdout: &str) -> Result<usize> {
    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix("Pages:") {
            let num = rest.trim();
            return num
                .parse()
                .map_err(|_| IngestError::PageCount(format!("bad 'Pages:' value: {num}")));
        }
    }
    Err(IngestError::PageCount(
        "pdfinfo output has no 'Pages:' line".to_string(),
    ))
}
