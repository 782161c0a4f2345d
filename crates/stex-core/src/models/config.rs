//! Configuration structures for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::InstitutionProfile;

/// Main configuration for the stex pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StexConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Report output configuration.
    pub report: ReportConfig,
}

impl Default for StexConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Field extraction configuration.
///
/// The ceilings reject numerals accidentally captured from unrelated
/// larger figures on a page (an account number misread as an amount).
/// They are calibration values for the statement population at hand, not
/// constants with inherent meaning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Plausibility ceiling for Wells Fargo Advisors closing values.
    pub wfa_value_ceiling: Decimal,

    /// Plausibility ceiling for BOK Financial closing values.
    pub bok_value_ceiling: Decimal,

    /// Plausibility ceiling applied to unclassified documents.
    pub fallback_value_ceiling: Decimal,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            wfa_value_ceiling: Decimal::from(1_000_000_000_u64),
            bok_value_ceiling: Decimal::from(10_000_000_000_u64),
            fallback_value_ceiling: Decimal::from(1_000_000_000_u64),
        }
    }
}

impl ExtractionConfig {
    /// The ceiling used to reject spurious numeral matches for a profile.
    pub fn value_ceiling(&self, institution: InstitutionProfile) -> Decimal {
        match institution {
            InstitutionProfile::WellsFargoAdvisors => self.wfa_value_ceiling,
            InstitutionProfile::BokFinancial => self.bok_value_ceiling,
            InstitutionProfile::Unknown => self.fallback_value_ceiling,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title line for the batch report.
    pub title: String,

    /// Maximum needs-review entries printed to the console.
    pub review_list_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "Statement Summary".to_string(),
            review_list_limit: 15,
        }
    }
}

impl StexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
