//! Deterministic keyword rules deciding which statement rows are deposits
//! worth reporting, and which payer they came from.
//!
//! Priority: card-processor exclusions > financing > insurance payers > plain
//! teller deposits.

use depscan_core::DepositCategory;
use serde::{Deserialize, Serialize};

/// Card processor settlements and patient-financing payouts, never reported
const EXCLUDED: &[&str] = &["SHIFT4/PYMT", "CHERRY/PAYMENT"];

const FINANCING: &[&str] = &["SYNCHRONY"];

/// Insurance payers, first match wins
const PAYERS: &[(&[&str], DepositCategory)] = &[
    (&["METLIFE"], DepositCategory::MetlifeDental),
    (&["FEP DENTAL", "FEP BLUE"], DepositCategory::FepDental),
    (&["DELTA DENTAL"], DepositCategory::DeltaDental),
    (&["CIGNA"], DepositCategory::CignaDental),
    (&["AETNA"], DepositCategory::AetnaDental),
    (&["GUARDIAN"], DepositCategory::GuardianDental),
    (
        &["UNITEDHEALTHCARE", "UNITED HEALTHCARE", "UHC"],
        DepositCategory::UnitedHealthcare,
    ),
    (&["HORIZON"], DepositCategory::HorizonDental),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOptions {
    /// Report Synchrony patient-financing deposits
    #[serde(default)]
    pub include_financing: bool,
    /// Report plain teller/mobile "DEPOSIT" rows
    #[serde(default)]
    pub include_regular: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionStyle {
    /// Canonical payer label plus trace number
    #[default]
    Normalized,
    /// Statement text as extracted, minus date and amounts
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: DepositCategory,
    /// ACH trace number from a `TRN*1*<id>` segment
    pub reference: Option<String>,
}

/// Classify a transaction window.
///
/// `text` is the whole window joined on one line; `body` is the dated row's
/// description with the date and amounts removed.
pub fn classify(text: &str, body: &str, options: RuleOptions) -> Option<Classification> {
    let upper = text.to_uppercase();

    if EXCLUDED.iter().any(|k| upper.contains(k)) {
        return None;
    }

    let category = if FINANCING.iter().any(|k| upper.contains(k)) {
        if !options.include_financing {
            return None;
        }
        DepositCategory::SynchronyFinancing
    } else if let Some(category) = payer(&upper) {
        category
    } else if body.trim().to_uppercase().ends_with("DEPOSIT") {
        if !options.include_regular {
            return None;
        }
        DepositCategory::RegularDeposit
    } else {
        return None;
    };

    Some(Classification {
        category,
        reference: trace_number(&upper),
    })
}

fn payer(upper: &str) -> Option<DepositCategory> {
    PAYERS
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| contains_word(upper, k)))
        .map(|(_, category)| *category)
}

/// Substring test that refuses matches glued to other letters, so "UHC"
/// does not fire inside an unrelated token.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(i, m)| {
        let before = haystack[..i].chars().next_back();
        let after = haystack[i + m.len()..].chars().next();
        let letter = |c: Option<char>| c.is_some_and(|c| c.is_ascii_alphabetic());
        !letter(before) && !letter(after)
    })
}

/// `TRN*1*84512993*...` -> "84512993"
pub fn trace_number(upper: &str) -> Option<String> {
    let start = upper.find("TRN*1*")? + "TRN*1*".len();
    let id: String = upper[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    (!id.is_empty()).then_some(id)
}

/// Description for a classified window
pub fn describe(
    classification: &Classification,
    raw_body: &str,
    style: DescriptionStyle,
) -> String {
    match style {
        DescriptionStyle::Raw => raw_body.to_string(),
        DescriptionStyle::Normalized => match &classification.reference {
            Some(trn) => format!("{} TRN*1*{}", classification.category.label(), trn),
            None => classification.category.label().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> RuleOptions {
        RuleOptions {
            include_financing: true,
            include_regular: true,
        }
    }

    #[test]
    fn test_metlife_with_trace_number() {
        let text = "Jun 02 METLIFE DENTAL/HCCLAIMPMT 1,250.00 TRN*1*84512993*1135581829*4444";
        let c = classify(text, "METLIFE DENTAL/HCCLAIMPMT", RuleOptions::default()).unwrap();
        assert_eq!(c.category, DepositCategory::MetlifeDental);
        assert_eq!(c.reference.as_deref(), Some("84512993"));
        assert_eq!(
            describe(&c, "ignored", DescriptionStyle::Normalized),
            "METLIFE DENTAL/HCCLAIMPMT TRN*1*84512993"
        );
    }

    #[test]
    fn test_processor_settlements_are_excluded() {
        assert_eq!(
            classify("Jun 03 SHIFT4/PYMT DEPOSIT 412.50", "SHIFT4/PYMT DEPOSIT", all()),
            None
        );
        assert_eq!(classify("Jun 03 CHERRY/PAYMENT METLIFE 10.00", "CHERRY/PAYMENT", all()), None);
    }

    #[test]
    fn test_financing_needs_opt_in() {
        let text = "Jun 04 SYNCHRONY BANK/MTOT DEP 534812122067071 GENUINE SMILES PA 600.00";
        assert_eq!(classify(text, "SYNCHRONY BANK/MTOT DEP", RuleOptions::default()), None);
        let c = classify(text, "SYNCHRONY BANK/MTOT DEP", all()).unwrap();
        assert_eq!(c.category, DepositCategory::SynchronyFinancing);
    }

    #[test]
    fn test_plain_deposit_needs_opt_in() {
        assert_eq!(classify("Jun 05 DEPOSIT 300.00", "DEPOSIT", RuleOptions::default()), None);
        let c = classify("Jun 05 MOBILE DEPOSIT 300.00", "MOBILE DEPOSIT", all()).unwrap();
        assert_eq!(c.category, DepositCategory::RegularDeposit);
    }

    #[test]
    fn test_payer_deposit_is_not_a_plain_deposit() {
        // "...DEPOSIT" rows are kept when a payer keyword is present
        let row = "Jun 06 FEP DENTAL DEPOSIT 80.00";
        let c = classify(row, "FEP DENTAL DEPOSIT", RuleOptions::default()).unwrap();
        assert_eq!(c.category, DepositCategory::FepDental);
    }

    #[test]
    fn test_payer_keywords() {
        let cases = [
            ("DELTA DENTAL OF NJ HCCLAIMPMT", DepositCategory::DeltaDental),
            ("CIGNA EDGE/HCCLAIMPMT", DepositCategory::CignaDental),
            ("AETNA AS01/HCCLAIMPMT", DepositCategory::AetnaDental),
            ("GUARDIAN LIFE/HCCLAIMPMT", DepositCategory::GuardianDental),
            ("UHC/HCCLAIMPMT", DepositCategory::UnitedHealthcare),
            ("HORIZON BCBSNJ/HCCLAIMPMT", DepositCategory::HorizonDental),
        ];
        for (desc, expected) in cases {
            let c = classify(desc, desc, RuleOptions::default()).unwrap();
            assert_eq!(c.category, expected, "{desc}");
        }
    }

    #[test]
    fn test_short_keywords_need_word_edges() {
        assert_eq!(classify("Jun 07 SCHUHCO SUPPLY 10.00", "SCHUHCO SUPPLY", all()), None);
    }

    #[test]
    fn test_unrelated_rows() {
        let row = "Jun 08 ONLINE TRANSFER TO SAVINGS 50.00";
        assert_eq!(classify(row, "ONLINE TRANSFER TO SAVINGS", all()), None);
    }

    #[test]
    fn test_raw_description() {
        let c = Classification {
            category: DepositCategory::CignaDental,
            reference: None,
        };
        assert_eq!(
            describe(&c, "CIGNA EDGE/HCCLAIMPMT", DescriptionStyle::Raw),
            "CIGNA EDGE/HCCLAIMPMT"
        );
        assert_eq!(describe(&c, "x", DescriptionStyle::Normalized), "CIGNA DENTAL/HCCLAIMPMT");
    }

    #[test]
    fn test_trace_number() {
        assert_eq!(trace_number("TRN*1*CH01000582*1020574609").as_deref(), Some("CH01000582"));
        assert_eq!(trace_number("NO TRACE"), None);
        assert_eq!(trace_number("TRN*1*"), None);
    }
}
