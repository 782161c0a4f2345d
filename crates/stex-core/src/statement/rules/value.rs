//! Closing-value extraction from located page text.
//!
//! Each institution renders the closing-value label differently, and the
//! upstream text source is inconsistent about preserving whitespace, so
//! extraction runs an ordered list of surface-pattern rules per profile:
//! the most context-constrained rendering first, looser renderings as
//! fallbacks. The first candidate that parses and passes the sanity bound
//! wins.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::trace;

use crate::statement::InstitutionProfile;

/// One way a labeled amount may be rendered in page text.
pub struct ValueRule {
    pattern: Regex,
    /// Words that must not immediately precede the match. Compound labels
    /// ("Principal Total", "Accrued Income Total") name different figures.
    not_preceded_by: &'static [&'static str],
}

impl ValueRule {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            not_preceded_by: &[],
        }
    }

    fn not_preceded_by(mut self, words: &'static [&'static str]) -> Self {
        self.not_preceded_by = words;
        self
    }

    /// True when the text before `start`, ignoring trailing whitespace,
    /// ends with one of the guarded words.
    fn is_guarded(&self, text: &str, start: usize) -> bool {
        if self.not_preceded_by.is_empty() {
            return false;
        }
        let prefix = text[..start].trim_end();
        self.not_preceded_by
            .iter()
            .any(|word| ends_with_ignore_case(prefix, word))
    }
}

fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    let mut t = text.chars().rev();
    let mut s = suffix.chars().rev();
    loop {
        match (s.next(), t.next()) {
            (None, _) => return true,
            (Some(_), None) => return false,
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => {}
            _ => return false,
        }
    }
}

/// The "Closing value" renderings on WFA snapshot pages, most common
/// first. The numeral capture includes an optional leading minus so that
/// mis-scoped negative matches are seen and rejected by the bound.
fn closing_value_rules() -> Vec<ValueRule> {
    vec![
        // Standard spacing: "Closing value $108,250.83"
        ValueRule::new(r"(?i)Closing\s+value\s+\$\s*(-?[\d,]+\.\d{2})"),
        // No space before the currency marker: "Closing value$108,250.83"
        ValueRule::new(r"(?i)Closing\s+value\$\s*(-?[\d,]+\.\d{2})"),
        // Collapsed label: "Closingvalue$108,250.83"
        ValueRule::new(r"(?i)Closingvalue\s*\$\s*(-?[\d,]+\.\d{2})"),
        // Colon-delimited label, currency marker optional
        ValueRule::new(r"(?i)Closing\s+value:\s*\$?\s*(-?[\d,]+\.\d{2})"),
    ]
}

/// The bare investment-summary "Total" line, guarded against compound
/// totals naming other figures.
fn guarded_total_rule() -> ValueRule {
    ValueRule::new(r"(?i)\bTotal\s*:?\s*\$?\s*(-?[\d,]+\.\d{2})")
        .not_preceded_by(&["Principal", "Income", "Gain", "Loss"])
}

lazy_static! {
    static ref WFA_VALUE_RULES: Vec<ValueRule> = closing_value_rules();

    /// On BOK overview pages the target figure follows the Accrued Income
    /// line, which disambiguates it from the section's other totals; the
    /// guarded bare form is the fallback.
    static ref BOK_VALUE_RULES: Vec<ValueRule> = vec![
        ValueRule::new(
            r"(?i)Accrued\s*Income\s+-?[\d,]+\.\d{2}\s+Total\s+(-?[\d,]+\.\d{2})",
        ),
        guarded_total_rule(),
    ];

    /// No layout knowledge: every common rendering, tightest first.
    static ref FALLBACK_VALUE_RULES: Vec<ValueRule> = {
        let mut rules = closing_value_rules();
        rules.push(guarded_total_rule());
        rules
    };
}

fn value_rules(institution: InstitutionProfile) -> &'static [ValueRule] {
    match institution {
        InstitutionProfile::WellsFargoAdvisors => WFA_VALUE_RULES.as_slice(),
        InstitutionProfile::BokFinancial => BOK_VALUE_RULES.as_slice(),
        InstitutionProfile::Unknown => FALLBACK_VALUE_RULES.as_slice(),
    }
}

/// Apply a profile's value rules, in order, to located page text.
///
/// Candidates must parse and satisfy `0 <= value < ceiling`; violating
/// matches are discarded, never clamped. Absent text or no surviving
/// candidate yields `None`.
pub fn extract_value(
    text: Option<&str>,
    institution: InstitutionProfile,
    ceiling: Decimal,
) -> Option<Decimal> {
    let text = text?;

    for rule in value_rules(institution) {
        for caps in rule.pattern.captures_iter(text) {
            let matched = caps.get(0).unwrap();
            if rule.is_guarded(text, matched.start()) {
                continue;
            }
            let Some(value) = parse_amount(&caps[1]) else {
                continue;
            };
            if value >= Decimal::ZERO && value < ceiling {
                return Some(value);
            }
            trace!("rejected out-of-bounds candidate {}", value);
        }
    }

    None
}

/// Parse a captured numeral, stripping comma thousands separators.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ceiling() -> Decimal {
        Decimal::from(1_000_000_000_u64)
    }

    fn wfa(text: &str) -> Option<Decimal> {
        extract_value(
            Some(text),
            InstitutionProfile::WellsFargoAdvisors,
            ceiling(),
        )
    }

    fn bok(text: &str) -> Option<Decimal> {
        extract_value(Some(text), InstitutionProfile::BokFinancial, ceiling())
    }

    #[test]
    fn test_absent_text() {
        assert_eq!(
            extract_value(None, InstitutionProfile::WellsFargoAdvisors, ceiling()),
            None
        );
    }

    #[test]
    fn test_wfa_standard_spacing() {
        assert_eq!(
            wfa("SNAPSHOT\nClosing value $108,250.83\nOpening value $100.00"),
            Some(dec("108250.83"))
        );
    }

    #[test]
    fn test_wfa_collapsed_label_duplicated_figure() {
        // The label collapsed to one word and the figure printed twice:
        // one clean value must come out, not a concatenated numeral.
        assert_eq!(
            wfa("Closingvalue$45,156.04$45,156.04"),
            Some(dec("45156.04"))
        );
    }

    #[test]
    fn test_wfa_no_space_before_marker() {
        assert_eq!(wfa("Closing value$99.00"), Some(dec("99.00")));
    }

    #[test]
    fn test_wfa_colon_variant() {
        assert_eq!(wfa("Closing value: $1,500.00"), Some(dec("1500.00")));
        assert_eq!(wfa("Closing value: 1,500.00"), Some(dec("1500.00")));
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(wfa("Closing value $-12.50"), None);
    }

    #[test]
    fn test_over_ceiling_rejected() {
        assert_eq!(wfa("Closing value $1,234,567,890.00"), None);
    }

    #[test]
    fn test_zero_accepted() {
        assert_eq!(wfa("Closing value $0.00"), Some(dec("0.00")));
    }

    #[test]
    fn test_bok_accrued_income_context() {
        assert_eq!(
            bok("Principal 703,887.80\nAccrued Income 1,234.56 Total 705,122.36"),
            Some(dec("705122.36"))
        );
        // Collapsed label variant
        assert_eq!(
            bok("AccruedIncome 1,234.56 Total 705,122.36"),
            Some(dec("705122.36"))
        );
    }

    #[test]
    fn test_bok_compound_totals_guarded() {
        // "Principal Total" and "Accrued Income Total" name other figures;
        // the bare Total line is the one to take.
        assert_eq!(
            bok("Principal Total 9,999.99\nAccrued Income Total 1.01\nTotal 705,122.36"),
            Some(dec("705122.36"))
        );
        assert_eq!(bok("Accrued Income Total 123.45"), None);
    }

    #[test]
    fn test_bok_collapsed_compound_not_matched() {
        // Word-boundary: "PrincipalTotal" is not a bare Total.
        assert_eq!(bok("PrincipalTotal 9,999.99"), None);
    }

    #[test]
    fn test_unknown_profile_union() {
        let ceiling = Decimal::from(1_000_000_000_u64);
        assert_eq!(
            extract_value(
                Some("Closing value $10.00"),
                InstitutionProfile::Unknown,
                ceiling
            ),
            Some(dec("10.00"))
        );
        assert_eq!(
            extract_value(Some("Total 20.00"), InstitutionProfile::Unknown, ceiling),
            Some(dec("20.00"))
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("45,156.04"), Some(dec("45156.04")));
        assert_eq!(parse_amount("-12.50"), Some(dec("-12.50")));
        assert_eq!(parse_amount("1,234,567.89"), Some(dec("1234567.89")));
        assert_eq!(parse_amount("x"), None);
    }
}
