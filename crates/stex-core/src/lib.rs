//! Core library for custodian statement extraction.
//!
//! This crate provides:
//! - PDF page-text extraction (the page text source capability)
//! - Institution profile classification from page content
//! - Field extraction (account number, beneficiary code, closing value)
//! - Batch aggregation into a review-ready summary

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{Result, StexError};
pub use models::config::StexConfig;
pub use models::record::{RecordStatus, StatementRecord};
pub use pdf::{PageTextSource, PdfExtractor};
pub use statement::aggregate::{aggregate, AggregateReport};
pub use statement::{classify, InstitutionProfile, StatementParser};
