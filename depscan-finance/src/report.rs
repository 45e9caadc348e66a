//! Turns extracted statement text into deposit records and JSON reports.

use anyhow::{Context, Result};
use depscan_core::{
    DepositRecord, MergedReport, StatementDate, StatementReport, Summary, UNKNOWN_OFFICE,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::{debug, info};

use crate::amount::AmountParser;
use crate::deposit_rules::{DescriptionStyle, RuleOptions, classify, describe};
use crate::line_scanner::{DEFAULT_MAX_WINDOW_LINES, LineScanner, TransactionWindow};
use crate::office_detect::resolve_office;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub max_window_lines: usize,
    pub description_style: DescriptionStyle,
    #[serde(flatten)]
    pub rules: RuleOptions,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_window_lines: DEFAULT_MAX_WINDOW_LINES,
            description_style: DescriptionStyle::Normalized,
            rules: RuleOptions::default(),
        }
    }
}

/// Scanner, amount parser and options bundled for repeated use
#[derive(Debug, Clone)]
pub struct DepositParser {
    scanner: LineScanner,
    amounts: AmountParser,
    options: ParseOptions,
}

impl DepositParser {
    pub fn new(options: ParseOptions) -> Result<Self> {
        Ok(Self {
            scanner: LineScanner::new(options.max_window_lines)?,
            amounts: AmountParser::new()?,
            options,
        })
    }

    /// Deposit records found in `text`, in statement order, tagged with `office`
    pub fn parse_deposits(&self, text: &str, office: Option<&str>) -> Vec<DepositRecord> {
        let windows = self.scanner.scan_windows(text);
        debug!(windows = windows.len(), "scanned transaction windows");

        windows
            .iter()
            .filter_map(|w| self.window_to_record(w, office))
            .collect()
    }

    fn window_to_record(
        &self,
        window: &TransactionWindow,
        office: Option<&str>,
    ) -> Option<DepositRecord> {
        if !window.section.may_hold_deposits() {
            debug!(line = window.start_line, "row under a debit section, skipped");
            return None;
        }

        let joined = window.joined();
        let body = self.row_body(window.first_line());

        let classification = classify(&joined, &body, self.options.rules)?;

        let Some(amount) = self.amounts.first_amount(&joined) else {
            debug!(line = window.start_line, text = %joined, "deposit row without amount, skipped");
            return None;
        };

        let raw = self.raw_description(window);
        let description = describe(&classification, &raw, self.options.description_style);

        let date = window.date.to_string();
        Some(
            DepositRecord::new(date, description, amount, classification.category)
                .with_office(office.map(str::to_string))
                .with_reference(classification.reference),
        )
    }

    /// Dated row without its date and amounts
    fn row_body(&self, first_line: &str) -> String {
        let prefix = self.scanner.date_prefix_len(first_line);
        self.amounts.strip_amounts(&first_line[prefix..])
    }

    /// Whole window without the date and amounts
    fn raw_description(&self, window: &TransactionWindow) -> String {
        let mut parts = vec![self.row_body(window.first_line())];
        parts.extend(window.lines.iter().skip(1).map(|l| self.amounts.strip_amounts(l)));
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }

    /// Full single-statement report. `filename` takes precedence over the
    /// statement text for office attribution.
    pub fn build_report(&self, text: &str, filename: &str) -> StatementReport {
        let name = (!filename.is_empty()).then_some(filename);
        let (office, office_source) = resolve_office(name, text);
        let office_label = office.map(|o| o.label().to_string());

        let deposits = self.parse_deposits(text, office_label.as_deref());
        let summary = Summary::from_deposits(&deposits);
        info!(
            filename,
            office = office_label.as_deref().unwrap_or(UNKNOWN_OFFICE),
            deposits = summary.total_deposits,
            total = summary.total_amount,
            "statement parsed"
        );

        StatementReport {
            deposits,
            office: office_label.unwrap_or_else(|| UNKNOWN_OFFICE.to_string()),
            office_source,
            filename: filename.to_string(),
            summary,
        }
    }
}

pub fn parse_deposits(text: &str, options: &ParseOptions) -> Result<Vec<DepositRecord>> {
    Ok(DepositParser::new(*options)?.parse_deposits(text, None))
}

pub fn build_report(text: &str, filename: &str, options: &ParseOptions) -> Result<StatementReport> {
    Ok(DepositParser::new(*options)?.build_report(text, filename))
}

/// Combine several statements: each deposit carries its statement's office,
/// and the summary is recomputed over everything.
pub fn merge_reports(reports: Vec<StatementReport>) -> MergedReport {
    let mut deposits = Vec::new();
    let mut offices: Vec<String> = Vec::new();

    for report in reports {
        if report.office != UNKNOWN_OFFICE && !offices.contains(&report.office) {
            offices.push(report.office.clone());
        }
        let office = report.office;
        deposits.extend(report.deposits.into_iter().map(|mut d| {
            d.office = Some(office.clone());
            d
        }));
    }

    let summary = Summary::from_deposits(&deposits);
    MergedReport {
        deposits,
        offices,
        summary,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Description,
    Amount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Stable sort. Dates that do not parse sort after all real dates.
pub fn sort_deposits(deposits: &mut [DepositRecord], field: SortField, direction: SortDirection) {
    deposits.sort_by(|a, b| {
        let ord = match field {
            SortField::Date => compare_dates(&a.date, &b.date),
            SortField::Description => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
            SortField::Amount => a.amount.total_cmp(&b.amount),
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    match (StatementDate::parse(a), StatementDate::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// CSV export with every cell quoted
pub fn write_csv<W: Write>(deposits: &[DepositRecord], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    wtr.write_record(["Date", "Description", "Amount", "Office"])?;
    for d in deposits {
        let amount = format!("{:.2}", d.amount);
        wtr.write_record([
            d.date.as_str(),
            d.description.as_str(),
            amount.as_str(),
            d.office.as_deref().unwrap_or(""),
        ])?;
    }
    wtr.flush().context("flush csv")?;
    Ok(())
}

/// Bookkeeping sheet layout: deposits grouped by row date in calendar order.
/// Each group is a `Date M/D/YY` row, the `Amount, Insurance Company, Office`
/// column headers, one row per deposit, then an empty spacer row. Dates that
/// do not parse keep their statement text and come last.
pub fn write_sheet_rows<W: Write>(deposits: &[DepositRecord], year: i32, writer: W) -> Result<()> {
    let mut groups: BTreeMap<(bool, Option<StatementDate>, &str), Vec<&DepositRecord>> =
        BTreeMap::new();
    for d in deposits {
        let key = match StatementDate::parse(&d.date) {
            Some(date) => (false, Some(date), ""),
            None => (true, None, d.date.as_str()),
        };
        groups.entry(key).or_default().push(d);
    }
    debug!(groups = groups.len(), "grouped deposits by date");

    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);
    for ((_, date, raw), rows) in &groups {
        let header = match date.and_then(|d| d.with_year(year)) {
            Some(day) => format!("Date {}", day.format("%-m/%-d/%y")),
            None => match date {
                Some(d) => format!("Date {d}"),
                None => format!("Date {raw}"),
            },
        };
        wtr.write_record([header.as_str()])?;
        wtr.write_record(["Amount", "Insurance Company", "Office"])?;
        for d in rows {
            let amount = format!("{:.2}", d.amount);
            wtr.write_record([
                amount.as_str(),
                d.description.as_str(),
                d.office.as_deref().unwrap_or(UNKNOWN_OFFICE),
            ])?;
        }
        wtr.write_record([""])?;
    }
    wtr.flush().context("flush sheet rows")?;
    Ok(())
}
