//! Per-profile rules for locating the page that carries the closing value.

use crate::statement::InstitutionProfile;

use super::patterns::{ACCOUNT_OVERVIEW, PAGE_ONE_MARKER, PAGE_TWO_MARKER};

/// Find the page carrying the target field, in physical page order.
///
/// Profiles with a locating rule return `None` when no page satisfies it;
/// an arbitrary page is never substituted. The unknown profile has no rule
/// and falls back to the first page with any text. Pages without text are
/// skipped.
pub fn locate_field_page<'a>(
    pages: &'a [Option<String>],
    institution: InstitutionProfile,
) -> Option<&'a str> {
    let mut texts = pages.iter().filter_map(|p| p.as_deref());

    match institution {
        InstitutionProfile::WellsFargoAdvisors => texts.find(|t| is_wfa_snapshot_page(t)),
        InstitutionProfile::BokFinancial => texts.find(|t| is_bok_overview_page(t)),
        InstitutionProfile::Unknown => texts.find(|t| !t.trim().is_empty()),
    }
}

/// The WFA snapshot page is labeled "Page 1 of N". Some statements lose
/// that label in text extraction, so a page carrying both the SNAPSHOT
/// banner and a Closing label is accepted as a fallback.
fn is_wfa_snapshot_page(text: &str) -> bool {
    PAGE_ONE_MARKER.is_match(text) || (text.contains("SNAPSHOT") && text.contains("Closing"))
}

/// The BOK account overview is labeled "Page 2 of N" (the whitespace may
/// be fully collapsed) and must also carry the Account Overview heading:
/// later pages repeat the page-label pattern, so the label alone is not
/// enough.
fn is_bok_overview_page(text: &str) -> bool {
    PAGE_TWO_MARKER.is_match(text) && ACCOUNT_OVERVIEW.is_match(text)
}
