//! Apólice Extractor Library
//!
//! Core functionality for the insurance-policy text extraction service:
//! a regex pattern library, insurer detection, field extraction with
//! insurer-specific overrides, installment reconciliation, and conversion to
//! the legacy nested output shape.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types for the HTTP surface.
//! - `extractor`: Extraction pipeline entry points.
//! - `handlers`: HTTP request handlers.
//! - `insurer`: Insurer detection.
//! - `installments`: Installment schedule extraction.
//! - `legacy`: Legacy output format conversion.
//! - `models`: Core data models.
//! - `patterns`: Static pattern tables.
//! - `transforms`: Date and monetary value transforms.
//! - `validate`: Post-extraction reconciliation.

pub mod config;
pub mod errors;
pub mod extractor;
pub mod handlers;
pub mod insurer;
pub mod installments;
pub mod legacy;
pub mod models;
pub mod patterns;
pub mod transforms;
pub mod validate;

pub use extractor::{extract_from_text, extract_from_text_at};
pub use legacy::convert_to_legacy_format;
pub use models::{EnhancedExtractedData, ExtractedInstallment, LegacyExtractedData};
