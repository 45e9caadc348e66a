//! depscan-finance: turns statement text into deposit records.
//!
//! Line-window scanning, keyword classification, amount parsing, office
//! attribution and report assembly.

pub mod amount;
pub mod deposit_rules;
pub mod line_scanner;
pub mod office_detect;
pub mod report;

pub use amount::AmountParser;
pub use deposit_rules::{Classification, DescriptionStyle, RuleOptions, classify};
pub use line_scanner::{LineScanner, Section, TransactionWindow};
pub use office_detect::{office_from_filename, office_from_text, resolve_office};
pub use report::{
    DepositParser, ParseOptions, SortDirection, SortField, build_report, merge_reports,
    parse_deposits, sort_deposits, write_csv, write_sheet_rows,
};
