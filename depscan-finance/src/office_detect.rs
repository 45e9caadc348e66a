//! Attribute a statement to a practice office, from the uploaded filename
//! or from the owner block printed on the statement.

use depscan_core::{Office, OfficeSource};
use tracing::debug;

const OWNER_LABEL: &str = "ACCOUNT OWNER(S):";

/// "Kearny June 2025.pdf" -> Kearny
pub fn office_from_filename(filename: &str) -> Option<Office> {
    let upper = filename.to_ascii_uppercase();
    let stem = upper.strip_suffix(".PDF").unwrap_or(upper.as_str());
    Office::find_in_upper(stem)
}

/// Look for the office in the `Account Owner(s):` line; without one, fall
/// back to "GENUINE SMILES <OFFICE>", "SMILES <OFFICE>" or "<OFFICE> ... LLC"
/// anywhere in the text.
pub fn office_from_text(text: &str) -> Option<Office> {
    debug!(chars = text.len(), "detecting office from statement text");
    let upper = text.to_ascii_uppercase();

    if let Some(owner) = owner_line(&upper) {
        debug!(owner, "found account owner line");
        let office = Office::find_in_upper(owner);
        match office {
            Some(o) => debug!(office = %o, "office matched in owner line"),
            None => debug!("no office in owner line"),
        }
        return office;
    }

    debug!("no account owner line, trying name patterns");
    for office in Office::ALL {
        let key = office.key();
        let named = [format!("GENUINE SMILES {key}"), format!("SMILES {key}")];
        if named.iter().any(|p| upper.contains(p.as_str())) {
            debug!(office = %office, "office matched by practice name");
            return Some(office);
        }
        if upper.lines().any(|line| key_before_llc(line, key)) {
            debug!(office = %office, "office matched by LLC name");
            return Some(office);
        }
    }

    debug!("no office detected");
    None
}

/// Text after the first `Account Owner(s):` label, up to the end of its
/// line. Owners printed on the following line are picked up too. A label
/// with nothing after it counts as no owner line.
fn owner_line(upper: &str) -> Option<&str> {
    let start = upper.find(OWNER_LABEL)? + OWNER_LABEL.len();
    let owner = upper[start..].trim_start().lines().next()?.trim();
    (!owner.is_empty()).then_some(owner)
}

fn key_before_llc(line: &str, key: &str) -> bool {
    match line.find(key) {
        Some(i) => line[i + key.len()..].contains("LLC"),
        None => false,
    }
}

/// Filename wins over statement content
pub fn resolve_office(filename: Option<&str>, text: &str) -> (Option<Office>, OfficeSource) {
    if let Some(office) = filename.and_then(office_from_filename) {
        return (Some(office), OfficeSource::Filename);
    }
    match office_from_text(text) {
        Some(office) => (Some(office), OfficeSource::PdfContent),
        None => (None, OfficeSource::Unknown),
    }
}
