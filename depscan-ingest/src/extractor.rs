//! Per-page text extraction with OCR fallback for unreadable pages.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::ocr::OcrEngine;
use crate::poppler::TextLayer;
use crate::types::{ExtractedDocument, PageText, TextSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub ocr_enabled: bool,
    /// Pages with fewer alphanumeric characters than this go to OCR
    pub min_text_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            ocr_enabled: true,
            min_text_chars: 20,
        }
    }
}

/// True when a page's text layer is too thin to be worth scanning
pub fn needs_ocr(text: &str, min_chars: usize) -> bool {
    text.chars().filter(|c| c.is_alphanumeric()).count() < min_chars
}

pub struct StatementExtractor<'a> {
    text_layer: &'a dyn TextLayer,
    ocr: Option<&'a dyn OcrEngine>,
    options: ExtractOptions,
}

impl<'a> StatementExtractor<'a> {
    pub fn new(
        text_layer: &'a dyn TextLayer,
        ocr: Option<&'a dyn OcrEngine>,
        options: ExtractOptions,
    ) -> Self {
        Self {
            text_layer,
            ocr,
            options,
        }
    }

    pub fn extract(&self) -> Result<ExtractedDocument> {
        let count = self.text_layer.page_count()?;
        info!(pages = count, "extracting statement text");

        let mut pages = Vec::with_capacity(count);
        for number in 1..=count {
            pages.push(self.extract_page(number)?);
        }

        Ok(ExtractedDocument { pages })
    }

    fn extract_page(&self, number: usize) -> Result<PageText> {
        let text = self.text_layer.page_text(number)?;
        if !needs_ocr(&text, self.options.min_text_chars) {
            debug!(page = number, chars = text.len(), "using text layer");
            return Ok(PageText {
                number,
                text,
                source: TextSource::Parser,
            });
        }

        let ocr = match self.ocr {
            Some(engine) if self.options.ocr_enabled => engine,
            _ => {
                debug!(page = number, "text layer unreadable, OCR disabled");
                return Ok(fallback_page(number, text));
            }
        };

        match ocr.recognize_page(number) {
            Ok(ocr_text) if !ocr_text.trim().is_empty() => {
                info!(page = number, chars = ocr_text.len(), "page read with OCR");
                Ok(PageText {
                    number,
                    text: ocr_text,
                    source: TextSource::Ocr,
                })
            }
            Ok(_) => {
                warn!(page = number, "OCR produced no text");
                Ok(fallback_page(number, text))
            }
            Err(e) => {
                warn!(page = number, error = %e, "OCR failed, keeping text layer");
                Ok(fallback_page(number, text))
            }
        }
    }
}

fn fallback_page(number: usize, text: String) -> PageText {
    let source = if text.trim().is_empty() {
        TextSource::Empty
    } else {
        TextSource::Parser
    };
    PageText {
        number,
        text,
        source,
    }
}
