//! Batch aggregation of extraction records.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::record::{RecordStatus, StatementRecord};

use super::profile::InstitutionProfile;

/// Derived per-batch summary, built once from the full record set.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateReport {
    /// Sum of every present closing value.
    pub grand_total: Decimal,

    /// Records with both required fields present.
    pub complete: usize,

    /// Records missing at least one required field.
    pub needs_review: usize,

    /// Totals grouped by institution.
    pub institutions: BTreeMap<InstitutionProfile, GroupTotals>,

    /// Totals grouped by beneficiary code, over records that carry one.
    pub beneficiaries: BTreeMap<String, GroupTotals>,

    /// Needs-review records with their missing-field reasons.
    pub review_items: Vec<ReviewItem>,
}

/// Totals for one institution or beneficiary group.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupTotals {
    /// Documents in the group.
    pub files: usize,

    /// Documents with complete extraction.
    pub complete: usize,

    /// Sum of present closing values in the group.
    pub total_value: Decimal,
}

/// One record requiring human follow-up.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewItem {
    pub filename: String,
    pub institution: InstitutionProfile,
    /// Human-readable missing-field reasons.
    pub missing: Vec<String>,
}

/// Aggregate a batch of records.
///
/// Absent closing values contribute nothing to any total; they are not
/// zeros folded into a count.
pub fn aggregate(records: &[StatementRecord]) -> AggregateReport {
    let mut report = AggregateReport::default();

    for record in records {
        let complete = record.status() == RecordStatus::Complete;

        if let Some(value) = record.closing_value {
            report.grand_total += value;
        }

        let group = report.institutions.entry(record.institution).or_default();
        group.files += 1;
        if complete {
            group.complete += 1;
        }
        if let Some(value) = record.closing_value {
            group.total_value += value;
        }

        if let Some(beneficiary) = &record.beneficiary {
            let group = report.beneficiaries.entry(beneficiary.clone()).or_default();
            group.files += 1;
            if complete {
                group.complete += 1;
            }
            if let Some(value) = record.closing_value {
                group.total_value += value;
            }
        }

        if complete {
            report.complete += 1;
        } else {
            report.needs_review += 1;
            report.review_items.push(ReviewItem {
                filename: record.filename.clone(),
                institution: record.institution,
                missing: record
                    .missing_fields()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(
        filename: &str,
        institution: InstitutionProfile,
        beneficiary: Option<&str>,
        account: Option<&str>,
        value: Option<&str>,
    ) -> StatementRecord {
        StatementRecord {
            filename: filename.to_string(),
            institution,
            account_number: account.map(|s| s.to_string()),
            beneficiary: beneficiary.map(|s| s.to_string()),
            closing_value: value.map(|v| Decimal::from_str(v).unwrap()),
        }
    }

    #[test]
    fn test_absent_values_contribute_nothing() {
        let records = vec![
            record(
                "a.pdf",
                InstitutionProfile::WellsFargoAdvisors,
                None,
                Some("1-1"),
                Some("100.50"),
            ),
            record(
                "b.pdf",
                InstitutionProfile::WellsFargoAdvisors,
                None,
                Some("2-2"),
                None,
            ),
            record(
                "c.pdf",
                InstitutionProfile::BokFinancial,
                Some("BIC"),
                Some("3-3.1"),
                Some("200.25"),
            ),
        ];

        let report = aggregate(&records);

        assert_eq!(report.grand_total, Decimal::from_str("300.75").unwrap());
        assert_eq!(report.complete, 2);
        assert_eq!(report.needs_review, 1);
    }

    #[test]
    fn test_grouping_by_institution_and_beneficiary() {
        let records = vec![
            record(
                "a.pdf",
                InstitutionProfile::BokFinancial,
                Some("BIC"),
                Some("1-1.1"),
                Some("10.00"),
            ),
            record(
                "b.pdf",
                InstitutionProfile::BokFinancial,
                Some("BIC"),
                Some("2-2.1"),
                Some("5.00"),
            ),
            record(
                "c.pdf",
                InstitutionProfile::BokFinancial,
                Some("DAC"),
                Some("3-3.1"),
                None,
            ),
            record(
                "d.pdf",
                InstitutionProfile::WellsFargoAdvisors,
                None,
                Some("4-4"),
                Some("1.00"),
            ),
        ];

        let report = aggregate(&records);

        let bok = &report.institutions[&InstitutionProfile::BokFinancial];
        assert_eq!(bok.files, 3);
        assert_eq!(bok.complete, 2);
        assert_eq!(bok.total_value, Decimal::from_str("15.00").unwrap());

        let bic = &report.beneficiaries["BIC"];
        assert_eq!(bic.files, 2);
        assert_eq!(bic.total_value, Decimal::from_str("15.00").unwrap());

        let dac = &report.beneficiaries["DAC"];
        assert_eq!(dac.files, 1);
        assert_eq!(dac.total_value, Decimal::ZERO);
    }

    #[test]
    fn test_review_items_carry_reasons() {
        let records = vec![
            record(
                "bad.pdf",
                InstitutionProfile::WellsFargoAdvisors,
                None,
                None,
                None,
            ),
            record(
                "ok.pdf",
                InstitutionProfile::WellsFargoAdvisors,
                None,
                Some("1-1"),
                Some("1.00"),
            ),
        ];

        let report = aggregate(&records);

        assert_eq!(report.review_items.len(), 1);
        let item = &report.review_items[0];
        assert_eq!(item.filename, "bad.pdf");
        assert_eq!(item.missing, vec!["no account number", "no closing value"]);
    }

    #[test]
    fn test_empty_batch() {
        let report = aggregate(&[]);
        assert_eq!(report.grand_total, Decimal::ZERO);
        assert_eq!(report.complete, 0);
        assert_eq!(report.needs_review, 0);
        assert!(report.institutions.is_empty());
    }
}
