//! Per-document extraction result records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::InstitutionProfile;

/// The extraction outcome for a single statement document.
///
/// Every processed document yields exactly one record; fields that could
/// not be recovered are `None`. The review status is derived from field
/// presence via [`StatementRecord::status`] and is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Source document filename.
    pub filename: String,

    /// Institution profile the document was classified as.
    pub institution: InstitutionProfile,

    /// Account number recovered from the filename.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    /// Beneficiary code, for profiles that define one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary: Option<String>,

    /// Closing value recovered from the located statement page.
    /// Always non-negative and below the institution's plausibility
    /// ceiling when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_value: Option<Decimal>,
}

/// Review status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Both the account number and the closing value were extracted.
    Complete,

    /// At least one required field is missing; a human has to follow up.
    NeedsReview,
}

impl RecordStatus {
    /// Report label.
    pub fn display(&self) -> &'static str {
        match self {
            RecordStatus::Complete => "complete",
            RecordStatus::NeedsReview => "needs review",
        }
    }
}

impl StatementRecord {
    /// Derive the review status: complete iff the account number and the
    /// closing value are both present.
    pub fn status(&self) -> RecordStatus {
        if self.account_number.is_some() && self.closing_value.is_some() {
            RecordStatus::Complete
        } else {
            RecordStatus::NeedsReview
        }
    }

    /// Which required fields are missing, as report-ready reasons.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.account_number.is_none() {
            missing.push("no account number");
        }
        if self.closing_value.is_none() {
            missing.push("no closing value");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(account: Option<&str>, value: Option<&str>) -> StatementRecord {
        StatementRecord {
            filename: "statement.pdf".to_string(),
            institution: InstitutionProfile::WellsFargoAdvisors,
            account_number: account.map(|s| s.to_string()),
            beneficiary: None,
            closing_value: value.map(|v| Decimal::from_str(v).unwrap()),
        }
    }

    #[test]
    fn test_status_truth_table() {
        assert_eq!(
            record(Some("2193-4125"), Some("45156.04")).status(),
            RecordStatus::Complete
        );
        assert_eq!(
            record(Some("2193-4125"), None).status(),
            RecordStatus::NeedsReview
        );
        assert_eq!(
            record(None, Some("45156.04")).status(),
            RecordStatus::NeedsReview
        );
        assert_eq!(record(None, None).status(), RecordStatus::NeedsReview);
    }

    #[test]
    fn test_missing_field_reasons() {
        assert!(record(Some("2193-4125"), Some("1.00"))
            .missing_fields()
            .is_empty());
        assert_eq!(
            record(None, Some("1.00")).missing_fields(),
            vec!["no account number"]
        );
        assert_eq!(
            record(Some("2193-4125"), None).missing_fields(),
            vec!["no closing value"]
        );
        assert_eq!(
            record(None, None).missing_fields(),
            vec!["no account number", "no closing value"]
        );
    }
}
