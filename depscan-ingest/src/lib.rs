//! depscan-ingest: statement PDF text extraction (poppler text layer) with a
//! per-page tesseract OCR fallback.

pub mod error;
pub mod extractor;
pub mod ocr;
pub mod poppler;
pub mod tools;
pub mod types;

pub use error::{IngestError, Result};
pub use extractor::{ExtractOptions, StatementExtractor, needs_ocr};
pub use ocr::{OcrEngine, OcrSettings, TesseractOcr};
pub use poppler::{PopplerTextLayer, TextLayer};
pub use tools::ToolPaths;
pub use types::{ExtractedDocument, PageText, TextSource};
