//! Date-marker scanning over extracted statement text.
//!
//! Statement rows start with "Mon DD"; long ACH descriptions wrap onto the
//! next one or two lines:
//!   Jun 02   METLIFE DENTAL/HCCLAIMPMT                     1,250.00
//!            TRN*1*84512993*1135581829*4444
//!   Jun 03   SHIFT4/PYMT DEPOSIT                             412.50

use anyhow::Result;
use depscan_core::StatementDate;
use regex::Regex;

/// Default number of continuation lines pulled into a window
pub const DEFAULT_MAX_WINDOW_LINES: usize = 3;

/// Statement section a row was printed under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    /// No section header seen yet
    #[default]
    Unmarked,
    /// Deposits and other credits
    Credits,
    /// Withdrawals, debits, checks, daily balances
    Debits,
}

impl Section {
    /// Rows under a debit header are never deposits. Text without any
    /// section headers is scanned as a whole.
    pub fn may_hold_deposits(self) -> bool {
        self != Section::Debits
    }
}

/// A dated statement row plus the wrapped lines that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionWindow {
    pub date: StatementDate,
    /// Trimmed lines; the first one still carries the date
    pub lines: Vec<String>,
    /// 0-based index of the dated line in the input text
    pub start_line: usize,
    pub section: Section,
}

impl TransactionWindow {
    /// Lines joined with single spaces
    pub fn joined(&self) -> String {
        collapse_ws(&self.lines.join(" "))
    }

    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct LineScanner {
    date_re: Regex,
    break_re: Regex,
    credit_re: Regex,
    debit_re: Regex,
    max_window_lines: usize,
}

impl LineScanner {
    pub fn new(max_window_lines: usize) -> Result<Self> {
        let date_re = Regex::new(
            r"(?i)^(?P<mon>jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s+(?P<day>\d{1,2})\b",
        )?;
        // Headers and totals that end a transaction block
        let break_re = Regex::new(concat!(
            r"(?i)^(?:daily\s+(?:ending\s+)?balance|withdrawals|checks\b|total\b|",
            r"(?:other\s+|electronic\s+)?(?:debits|credits)\b|",
            r"ending\s+balance|beginning\s+balance|page\s+\d+\s+of\s+\d+|",
            r"deposits\s+(?:and|&)\s+(?:other\s+)?(?:credits|additions)|",
            r"date\s+description)"
        ))?;
        let credit_re = Regex::new(concat!(
            r"(?i)^(?:deposits\s+(?:and|&)\s+(?:other\s+)?(?:credits|additions)|",
            r"(?:other\s+|electronic\s+)?credits\b|deposits\s*$)"
        ))?;
        let debit_re = Regex::new(concat!(
            r"(?i)^(?:withdrawals|(?:other\s+|electronic\s+)?debits\b|checks\b|",
            r"daily\s+(?:ending\s+)?balance)"
        ))?;

        Ok(Self {
            date_re,
            break_re,
            credit_re,
            debit_re,
            max_window_lines,
        })
    }

    /// Date at the start of a (trimmed) line, if any
    pub fn date_marker(&self, line: &str) -> Option<StatementDate> {
        let caps = self.date_re.captures(line.trim())?;
        StatementDate::parse(&format!("{} {}", &caps["mon"], &caps["day"]))
    }

    /// Byte length of the date prefix of a trimmed line
    pub fn date_prefix_len(&self, line: &str) -> usize {
        self.date_re.find(line).map(|m| m.end()).unwrap_or(0)
    }

    fn is_break(&self, line: &str) -> bool {
        self.break_re.is_match(line)
    }

    /// Section opened by an undated header line, if it is one
    pub fn section_header(&self, line: &str) -> Option<Section> {
        let line = line.trim();
        if self.credit_re.is_match(line) {
            Some(Section::Credits)
        } else if self.debit_re.is_match(line) {
            Some(Section::Debits)
        } else {
            None
        }
    }

    /// Greedy single pass. A window runs from a dated line through at most
    /// `max_window_lines` continuation lines, stopping early at a blank line,
    /// the next dated line or a section break. Windows never overlap. Each
    /// window records the section header most recently seen above it; page
    /// footers do not reset the section.
    pub fn scan_windows(&self, text: &str) -> Vec<TransactionWindow> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let mut out = Vec::new();
        let mut section = Section::Unmarked;
        let mut i = 0;

        while i < lines.len() {
            let Some(date) = self.date_marker(lines[i]) else {
                if let Some(next) = self.section_header(lines[i]) {
                    section = next;
                }
                i += 1;
                continue;
            };

            let start_line = i;
            let mut window = vec![lines[i].to_string()];
            i += 1;

            while i < lines.len() && window.len() <= self.max_window_lines {
                let next = lines[i];
                if next.is_empty() || self.is_break(next) || self.date_marker(next).is_some() {
                    break;
                }
                window.push(next.to_string());
                i += 1;
            }

            out.push(TransactionWindow {
                date,
                lines: window,
                start_line,
                section,
            });
        }

        out
    }
}

pub(crate) fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
