//! Summary and report shapes printed as JSON

use serde::{Deserialize, Serialize};

use crate::deposit::{DepositCategory, DepositRecord};
use crate::office::OfficeSource;

/// Label used when no office could be attributed
pub const UNKNOWN_OFFICE: &str = "Unknown";

/// Per-category deposit counts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub regular_deposits: usize,
    pub metlife_payments: usize,
    pub synchrony_deposits: usize,
    pub fep_dental: usize,
    pub delta_dental: usize,
    pub cigna_payments: usize,
    pub aetna_payments: usize,
    pub guardian_payments: usize,
    pub united_healthcare_payments: usize,
    pub horizon_payments: usize,
}

impl Breakdown {
    fn slot(&mut self, category: DepositCategory) -> &mut usize {
        match category {
            DepositCategory::RegularDeposit => &mut self.regular_deposits,
            DepositCategory::MetlifeDental => &mut self.metlife_payments,
            DepositCategory::SynchronyFinancing => &mut self.synchrony_deposits,
            DepositCategory::FepDental => &mut self.fep_dental,
            DepositCategory::DeltaDental => &mut self.delta_dental,
            DepositCategory::CignaDental => &mut self.cigna_payments,
            DepositCategory::AetnaDental => &mut self.aetna_payments,
            DepositCategory::GuardianDental => &mut self.guardian_payments,
            DepositCategory::UnitedHealthcare => &mut self.united_healthcare_payments,
            DepositCategory::HorizonDental => &mut self.horizon_payments,
        }
    }

    pub fn count(&self, category: DepositCategory) -> usize {
        match category {
            DepositCategory::RegularDeposit => self.regular_deposits,
            DepositCategory::MetlifeDental => self.metlife_payments,
            DepositCategory::SynchronyFinancing => self.synchrony_deposits,
            DepositCategory::FepDental => self.fep_dental,
            DepositCategory::DeltaDental => self.delta_dental,
            DepositCategory::CignaDental => self.cigna_payments,
            DepositCategory::AetnaDental => self.aetna_payments,
            DepositCategory::GuardianDental => self.guardian_payments,
            DepositCategory::UnitedHealthcare => self.united_healthcare_payments,
            DepositCategory::HorizonDental => self.horizon_payments,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_deposits: usize,
    /// Sum of deposit amounts, rounded to cents
    pub total_amount: f64,
    pub breakdown: Breakdown,
}

impl Summary {
    pub fn from_deposits(deposits: &[DepositRecord]) -> Self {
        let mut breakdown = Breakdown::default();
        for d in deposits {
            *breakdown.slot(d.category) += 1;
        }
        let total: f64 = deposits.iter().map(|d| d.amount).sum();

        Self {
            total_deposits: deposits.len(),
            total_amount: round_cents(total),
            breakdown,
        }
    }
}

/// Round a dollar amount to two decimal places
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Output for a single statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatementReport {
    pub deposits: Vec<DepositRecord>,
    pub office: String,
    pub office_source: OfficeSource,
    pub filename: String,
    pub summary: Summary,
}

/// Output for several statements processed together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MergedReport {
    pub deposits: Vec<DepositRecord>,
    pub offices: Vec<String>,
    pub summary: Summary,
}

/// Printed instead of a report when processing fails
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn processing_failed(reason: impl std::fmt::Display) -> Self {
        Self {
            error: format!("Failed to process PDF: {reason}"),
        }
    }
}
