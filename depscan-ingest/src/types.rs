use serde::{Deserialize, Serialize};

/// How a page's text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Embedded text layer
    Parser,
    /// Rendered and recognized with OCR
    Ocr,
    /// Nothing usable on the page
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number
    pub number: usize,
    pub text: String,
    pub source: TextSource,
}

/// All pages of one statement, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub pages: Vec<PageText>,
}

impl ExtractedDocument {
    /// Concatenate page texts, each followed by a newline. Empty pages are skipped.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for page in &self.pages {
            if page.text.is_empty() {
                continue;
            }
            out.push_str(&page.text);
            out.push('\n');
        }
        out
    }

    pub fn ocr_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.source == TextSource::Ocr).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_skips_empty_pages() {
        let doc = ExtractedDocument {
            pages: vec![
                PageText {
                    number: 1,
                    text: "Account Owner(s): X".into(),
                    source: TextSource::Parser,
                },
                PageText {
                    number: 2,
                    text: String::new(),
                    source: TextSource::Empty,
                },
                PageText {
                    number: 3,
                    text: "Jun 02 DEPOSIT 10.00".into(),
                    source: TextSource::Ocr,
                },
            ],
        };
        assert_eq!(doc.full_text(), "Account Owner(s): X\nJun 02 DEPOSIT 10.00\n");
        assert_eq!(doc.ocr_pages(), 1);
    }
}
