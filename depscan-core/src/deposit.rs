//! Deposit record types extracted from bank statements

use serde::{Deserialize, Serialize};

/// A single deposit line pulled out of a statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepositRecord {
    /// Month abbreviation + day as printed on the statement ("Jun 03")
    pub date: String,
    /// Normalized or raw description text
    pub description: String,
    /// Deposit amount in dollars, always positive
    pub amount: f64,
    /// Office label the statement belongs to
    pub office: Option<String>,
    /// Which keyword rule matched
    pub category: DepositCategory,
    /// ACH trace number (the `TRN*1*<id>` segment), when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Deposit sources matched deterministically by keyword
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum DepositCategory {
    MetlifeDental,
    FepDental,
    DeltaDental,
    CignaDental,
    AetnaDental,
    GuardianDental,
    UnitedHealthcare,
    HorizonDental,
    SynchronyFinancing,
    RegularDeposit,
}

impl DepositCategory {
    pub const ALL: [DepositCategory; 10] = [
        DepositCategory::MetlifeDental,
        DepositCategory::FepDental,
        DepositCategory::DeltaDental,
        DepositCategory::CignaDental,
        DepositCategory::AetnaDental,
        DepositCategory::GuardianDental,
        DepositCategory::UnitedHealthcare,
        DepositCategory::HorizonDental,
        DepositCategory::SynchronyFinancing,
        DepositCategory::RegularDeposit,
    ];

    /// Insurance claim payments, as opposed to financing or teller deposits
    pub fn is_insurance(&self) -> bool {
        !matches!(
            self,
            DepositCategory::SynchronyFinancing | DepositCategory::RegularDeposit
        )
    }

    /// Canonical description prefix used for normalized descriptions
    pub fn label(&self) -> &'static str {
        match self {
            DepositCategory::MetlifeDental => "METLIFE DENTAL/HCCLAIMPMT",
            DepositCategory::FepDental => "FEP DENTAL 36C/HCCLAIMPMT",
            DepositCategory::DeltaDental => "DELTA DENTAL/HCCLAIMPMT",
            DepositCategory::CignaDental => "CIGNA DENTAL/HCCLAIMPMT",
            DepositCategory::AetnaDental => "AETNA DENTAL/HCCLAIMPMT",
            DepositCategory::GuardianDental => "GUARDIAN LIFE/HCCLAIMPMT",
            DepositCategory::UnitedHealthcare => "UNITEDHEALTHCARE/HCCLAIMPMT",
            DepositCategory::HorizonDental => "HORIZON BCBSNJ/HCCLAIMPMT",
            DepositCategory::SynchronyFinancing => "SYNCHRONY BANK/MTOT DEP",
            DepositCategory::RegularDeposit => "DEPOSIT",
        }
    }
}

impl DepositRecord {
    pub fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        category: DepositCategory,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            amount,
            office: None,
            category,
            reference: None,
        }
    }

    pub fn with_office(mut self, office: Option<String>) -> Self {
        self.office = office;
        self
    }

    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = reference;
        self
    }

    pub fn is_insurance(&self) -> bool {
        self.category.is_insurance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let record = DepositRecord::new(
            "Jun 03",
            "FEP DENTAL 36C/HCCLAIMPMT",
            212.0,
            DepositCategory::FepDental,
        )
        .with_office(Some("Kearny".to_string()));
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["date"], "Jun 03");
        assert_eq!(json["amount"], 212.0);
        assert_eq!(json["office"], "Kearny");
        assert_eq!(json["category"], "fep-dental");
        // reference is left out entirely when absent
        assert!(json.get("reference").is_none());
    }

    #[test]
    fn test_null_office_is_serialized() {
        let record = DepositRecord::new("Jun 03", "DEPOSIT", 50.0, DepositCategory::RegularDeposit);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["office"].is_null());
    }

    #[test]
    fn test_insurance_flags() {
        assert!(DepositCategory::MetlifeDental.is_insurance());
        assert!(DepositCategory::HorizonDental.is_insurance());
        assert!(!DepositCategory::SynchronyFinancing.is_insurance());
        assert!(!DepositCategory::RegularDeposit.is_insurance());
        assert_eq!(DepositCategory::ALL.iter().filter(|c| c.is_insurance()).count(), 8);
    }
}
