//! Statement extraction orchestrator.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::record::StatementRecord;

use super::profile::classify;
use super::rules::{extract_value, locate_field_page, parse_filename};

/// Runs the per-document extraction sequence: classify the institution,
/// parse the filename fields, locate the field page, extract the closing
/// value. A failed sub-step degrades its field to absent and never aborts
/// the document; documents never affect each other's results.
pub struct StatementParser {
    config: ExtractionConfig,
}

impl StatementParser {
    /// Create a parser with default extraction settings.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Use calibrated extraction settings.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Produce the extraction record for one document.
    pub fn process(&self, filename: &str, pages: &[Option<String>]) -> StatementRecord {
        let institution = classify(pages);
        let fields = parse_filename(filename);

        let page = locate_field_page(pages, institution);
        if page.is_none() {
            debug!(
                "{}: no page matched the {} locating rule",
                filename,
                institution.display_name()
            );
        }

        let closing_value =
            extract_value(page, institution, self.config.value_ceiling(institution));

        // Beneficiary codes only mean something for profiles that define
        // them; otherwise a 2-4 letter word in the entity name is noise.
        let beneficiary = if institution.uses_beneficiary_codes() {
            fields.beneficiary
        } else {
            None
        };

        let record = StatementRecord {
            filename: filename.to_string(),
            institution,
            account_number: fields.account_number,
            beneficiary,
            closing_value,
        };

        debug!(
            "{}: {} [{}]",
            record.filename,
            record.status().display(),
            institution.display_name()
        );

        record
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}
