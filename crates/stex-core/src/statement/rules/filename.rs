//! Account number and beneficiary extraction from statement filenames.
//!
//! Filenames follow the convention `<entity name> - <account section>.pdf`,
//! e.g. `First Coverage Re BIC - 1150-0007374.1.pdf`. The entity section
//! may itself contain ` - `, so the split is on the last occurrence.

use super::patterns::{ACCOUNT_FULL, ACCOUNT_SIMPLE, BENEFICIARY_CODE, WAREHOUSE_MARKER};

/// Fields recoverable from a statement filename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameFields {
    /// Account number from the section after the last ` - `.
    pub account_number: Option<String>,

    /// Beneficiary code from the entity section, uppercased.
    pub beneficiary: Option<String>,
}

/// Parse the account number and beneficiary code from a filename.
/// A filename without the ` - ` separator yields neither field.
pub fn parse_filename(name: &str) -> FilenameFields {
    let stem = strip_pdf_extension(name);

    let Some((name_section, account_section)) = stem.rsplit_once(" - ") else {
        return FilenameFields::default();
    };

    FilenameFields {
        account_number: extract_account(account_section.trim()),
        beneficiary: extract_beneficiary(name_section.trim()),
    }
}

/// Strip a trailing `.pdf` only. Account tokens may end in `.N`, so a
/// generic last-extension strip would eat part of the account number.
fn strip_pdf_extension(name: &str) -> &str {
    if name.to_ascii_lowercase().ends_with(".pdf") {
        &name[..name.len() - 4]
    } else {
        name
    }
}

/// First account pattern that matches wins: the dash+period form is more
/// specific than the plain dash form; neither matching falls back to the
/// first whitespace-delimited token of the section.
fn extract_account(section: &str) -> Option<String> {
    if let Some(caps) = ACCOUNT_FULL.captures(section) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = ACCOUNT_SIMPLE.captures(section) {
        return Some(caps[1].to_string());
    }
    section.split_whitespace().next().map(|s| s.to_string())
}

/// Scan the entity section's words closest-to-separator first, skipping
/// warehouse marker words; the first remaining 2-4 letter word is the
/// beneficiary code.
fn extract_beneficiary(section: &str) -> Option<String> {
    for word in section.split_whitespace().rev() {
        if WAREHOUSE_MARKER.is_match(word) {
            continue;
        }
        if BENEFICIARY_CODE.is_match(word) {
            return Some(word.to_ascii_uppercase());
        }
    }
    None
}
