//! depscan-core: deposit, office, date and summary types shared by the scanner crates

pub mod date;
pub mod deposit;
pub mod office;
pub mod summary;

pub use date::StatementDate;
pub use deposit::{DepositCategory, DepositRecord};
pub use office::{Office, OfficeSource};
pub use summary::{
    Breakdown, ErrorReport, MergedReport, StatementReport, Summary, UNKNOWN_OFFICE, round_cents,
};
