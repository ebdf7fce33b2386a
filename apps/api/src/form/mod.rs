// Form / validation layer: field constraints, document-wide validation, the
// AI-summary prerequisite gate and per-section editor status.

pub mod completeness;
pub mod validation;

pub use completeness::{compute_completeness_report, CompletenessReport};
pub use validation::{
    check_summary_prerequisites, validate_document, MissingInformation, ValidationReport,
};
