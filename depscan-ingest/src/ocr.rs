//! OCR fallback: render a page with `pdftoppm`, read it with `tesseract`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::tools::{ToolPaths, run_tool};

pub trait OcrEngine {
    /// Recognize the text of a 1-based page
    fn recognize_page(&self, page: usize) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrSettings {
    pub language: String,
    pub dpi: u32,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            dpi: 300,
        }
    }
}

/// Page images are written to a private temp dir that is removed on drop.
#[derive(Debug)]
pub struct TesseractOcr {
    pdf: PathBuf,
    tools: ToolPaths,
    settings: OcrSettings,
    work_dir: TempDir,
}

impl TesseractOcr {
    pub fn new(pdf: impl Into<PathBuf>, tools: ToolPaths, settings: OcrSettings) -> Result<Self> {
        let work_dir = tempfile::Builder::new().prefix("depscan-ocr-").tempdir()?;
        Ok(Self {
            pdf: pdf.into(),
            tools,
            settings,
            work_dir,
        })
    }

    fn render_page(&self, page: usize) -> Result<PathBuf> {
        let page_str = page.to_string();
        let dpi = self.settings.dpi.to_string();
        let prefix = self.work_dir.path().join(format!("page_{page:03}"));
        let prefix_str = prefix
            .to_str()
            .ok_or_else(|| IngestError::InvalidPath(prefix.display().to_string()))?;
        let pdf = self
            .pdf
            .to_str()
            .ok_or_else(|| IngestError::InvalidPath(self.pdf.display().to_string()))?;

        // -singlefile drops pdftoppm's page-number suffix: output is <prefix>.png
        run_tool(
            &self.tools.pdftoppm,
            [
                "-png",
                "-gray",
                "-singlefile",
                "-r",
                dpi.as_str(),
                "-f",
                page_str.as_str(),
                "-l",
                page_str.as_str(),
                pdf,
                prefix_str,
            ],
        )?;

        let image = prefix.with_extension("png");
        if !image.exists() {
            return Err(IngestError::ToolFailed {
                tool: self.tools.pdftoppm.clone(),
                status: 0,
                stderr: format!("expected rendered image not found: {}", image.display()),
            });
        }
        Ok(image)
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize_page(&self, page: usize) -> Result<String> {
        let image = self.render_page(page)?;
        debug!(page, image = %image.display(), "rendered page for OCR");

        // psm 6: treat the page as one uniform block, keeps statement rows intact
        let stdout = run_tool(
            &self.tools.tesseract,
            [
                image.as_os_str(),
                OsStr::new("stdout"),
                OsStr::new("-l"),
                OsStr::new(&self.settings.language),
                OsStr::new("--psm"),
                OsStr::new("6"),
            ],
        )?;

        remove_page_image(&image);
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Drop a rendered page once it is recognized. The work dir removes
/// anything left over when it is dropped.
fn remove_page_image(image: &Path) {
    if let Err(e) = std::fs::remove_file(image) {
        debug!(image = %image.display(), error = %e, "page image not removed");
    }
}
