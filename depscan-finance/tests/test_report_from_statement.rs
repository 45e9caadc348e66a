use depscan_core::{DepositCategory, OfficeSource};
use depscan_finance::{
    DescriptionStyle, ParseOptions, RuleOptions, SortDirection, SortField, build_report,
    merge_reports, sort_deposits, write_csv,
};

const LIVINGSTON_JUNE: &str = include_str!("fixtures/provident_livingston_june.txt");

#[test]
fn test_insurance_deposits_from_statement() {
    let report =
        build_report(LIVINGSTON_JUNE, "statement-0625.pdf", &ParseOptions::default()).unwrap();

    assert_eq!(report.office, "Livingston");
    assert_eq!(report.office_source, OfficeSource::PdfContent);

    let dates: Vec<_> = report.deposits.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, vec!["Jun 02", "Jun 05", "Jun 11", "Jun 16", "Jun 23"]);
    assert!(report.deposits.iter().all(|d| d.is_insurance()));

    // 1,250.00 + 212.00 + 2,014.75 + 96.40 + 518.70
    assert_eq!(report.summary.total_deposits, 5);
    assert_eq!(report.summary.total_amount, 4091.85);
    assert_eq!(report.summary.breakdown.metlife_payments, 2);
    assert_eq!(report.summary.breakdown.fep_dental, 1);
    assert_eq!(report.summary.breakdown.delta_dental, 1);
    assert_eq!(report.summary.breakdown.cigna_payments, 1);
    assert_eq!(report.summary.breakdown.synchrony_deposits, 0);
}

#[test]
fn test_premium_debits_stay_out_of_totals() {
    let options = ParseOptions {
        description_style: DescriptionStyle::Raw,
        rules: RuleOptions {
            include_financing: true,
            include_regular: true,
        },
        ..Default::default()
    };
    let report = build_report(LIVINGSTON_JUNE, "", &options).unwrap();

    // METLIFE and HORIZON premiums are listed under Withdrawals and Other Debits
    assert!(report.deposits.iter().all(|d| !d.description.contains("PREMIUM")));
    assert!(report.deposits.iter().all(|d| d.date != "Jun 12" && d.date != "Jun 18"));
    assert_eq!(report.summary.breakdown.horizon_payments, 0);
    assert_eq!(report.summary.breakdown.metlife_payments, 2);
}

#[test]
fn test_everything_opted_in() {
    let options = ParseOptions {
        rules: RuleOptions {
            include_financing: true,
            include_regular: true,
        },
        ..Default::default()
    };
    let report = build_report(LIVINGSTON_JUNE, "", &options).unwrap();

    // processor settlements and withdrawals are never deposits
    assert!(report.deposits.iter().all(|d| !d.description.contains("SHIFT4")));
    assert!(report.deposits.iter().all(|d| !d.description.contains("PAYROLL")));

    assert_eq!(report.summary.total_deposits, 8);
    assert_eq!(report.summary.breakdown.regular_deposits, 2);
    assert_eq!(report.summary.breakdown.synchrony_deposits, 1);
}

#[test]
fn test_raw_descriptions_keep_statement_text() {
    let options = ParseOptions {
        description_style: DescriptionStyle::Raw,
        ..Default::default()
    };
    let report = build_report(LIVINGSTON_JUNE, "", &options).unwrap();
    let delta = report
        .deposits
        .iter()
        .find(|d| d.category == DepositCategory::DeltaDental)
        .unwrap();

    assert_eq!(delta.description, "DELTA DENTAL OF NJ/HCCLAIMPMT TRN*1*1000229384*1221544890");
    assert_eq!(delta.reference.as_deref(), Some("1000229384"));
}

#[test]
fn test_merged_multi_office_export() {
    let livingston = build_report(LIVINGSTON_JUNE, "", &ParseOptions::default()).unwrap();
    let kearny = build_report(
        "Jun 01   AETNA AS01/HCCLAIMPMT   310.00\n",
        "Kearny June.pdf",
        &ParseOptions::default(),
    )
    .unwrap();
    assert_eq!(kearny.office_source, OfficeSource::Filename);

    let mut merged = merge_reports(vec![livingston, kearny]);
    assert_eq!(merged.offices, vec!["Livingston", "Kearny"]);
    assert_eq!(merged.summary.total_deposits, 6);
    assert_eq!(merged.summary.total_amount, 4401.85);

    sort_deposits(&mut merged.deposits, SortField::Date, SortDirection::Asc);
    assert_eq!(merged.deposits[0].office.as_deref(), Some("Kearny"));

    let json = serde_json::to_value(&merged).unwrap();
    assert_eq!(json["summary"]["breakdown"]["aetnaPayments"], 1);
    assert_eq!(json["deposits"][0]["category"], "aetna-dental");

    let mut csv = Vec::new();
    write_csv(&merged.deposits, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv.lines().count(), 7);
    let first_row = csv.lines().nth(1).unwrap();
    assert!(first_row.starts_with("\"Jun 01\",\"AETNA DENTAL/HCCLAIMPMT\",\"310.00\""));
}
