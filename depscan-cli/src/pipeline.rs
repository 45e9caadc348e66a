//! One statement from file to report: extract text (OCR where needed), then
//! hand the text to the deposit parser.

use anyhow::{Context, Result, bail};
use depscan_core::StatementReport;
use depscan_finance::DepositParser;
use depscan_ingest::{OcrEngine, PopplerTextLayer, StatementExtractor, TesseractOcr};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pdf,
    /// Already-extracted UTF-8 text
    Text,
}

/// Concatenated statement text for one input
pub fn statement_text(path: &Path, kind: InputKind, cfg: &Config) -> Result<String> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }

    match kind {
        InputKind::Text => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        InputKind::Pdf => {
            let layer = PopplerTextLayer::new(path, cfg.tools.clone());
            let ocr = if cfg.ocr.enabled {
                Some(
                    TesseractOcr::new(path, cfg.tools.clone(), cfg.ocr.settings())
                        .context("prepare OCR work dir")?,
                )
            } else {
                None
            };

            let doc = StatementExtractor::new(
                &layer,
                ocr.as_ref().map(|o| o as &dyn OcrEngine),
                cfg.ocr.extract_options(),
            )
            .extract()
            .with_context(|| format!("extract text from {}", path.display()))?;

            info!(
                file = %path.display(),
                pages = doc.pages.len(),
                ocr_pages = doc.ocr_pages(),
                "text extracted"
            );
            Ok(doc.full_text())
        }
    }
}

/// Name used for office detection: an explicit display name, else the file name
pub fn display_name(path: &Path, name: Option<&str>) -> String {
    match name {
        Some(n) => n.to_string(),
        None => path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

pub fn process_statement(
    path: &Path,
    name: Option<&str>,
    kind: InputKind,
    cfg: &Config,
    parser: &DepositParser,
) -> Result<StatementReport> {
    let text = statement_text(path, kind, cfg)?;
    let filename = display_name(path, name);
    Ok(parser.build_report(&text, &filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use depscan_finance::ParseOptions;

    #[test]
    fn test_display_name() {
        let p = Path::new("/tmp/uploads/statement-1718.pdf");
        assert_eq!(display_name(p, None), "statement-1718.pdf");
        assert_eq!(display_name(p, Some("Kearny June.pdf")), "Kearny June.pdf");
    }

    #[test]
    fn test_process_text_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hackensack-june.txt");
        fs::write(&path, "Jun 12   GUARDIAN LIFE/HCCLAIMPMT   145.00\n").unwrap();

        let parser = DepositParser::new(ParseOptions::default()).unwrap();
        let report =
            process_statement(&path, None, InputKind::Text, &Config::default(), &parser).unwrap();

        assert_eq!(report.filename, "hackensack-june.txt");
        assert_eq!(report.office, "Hackensack");
        assert_eq!(report.summary.total_amount, 145.0);
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/x.pdf");
        let err = statement_text(path, InputKind::Pdf, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }
}
