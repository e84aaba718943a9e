//! # Error Types
//!
//! Domain-specific error types for atelier-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atelier-core errors (this file)                                       │
//! │  ├── CoreError        - Document/registry rule violations              │
//! │  └── ValidationError  - Line/field validation failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → API layer → Frontend              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures always name the failing field, so the forms can
//! highlight exactly one input (designation, work_type, quantity, unit_price)
//! instead of showing a bulk error.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent document or registry rule violations. They should
/// be caught and translated to user-facing messages by the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The document is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Adding or removing lines on a finalized document
    /// - Finalizing a voided document
    /// - Resetting a document that already left Draft
    #[error("Document {reference} is {status}, cannot perform operation")]
    DocumentNotEditable { reference: String, status: String },

    /// The document has exceeded the maximum allowed number of lines.
    #[error("Document cannot have more than {max} lines")]
    DocumentTooLarge { max: usize },

    /// A document without lines cannot be finalized.
    #[error("Document {reference} has no lines")]
    EmptyDocument { reference: String },

    /// No line exists at the given position.
    #[error("No line at index {index}")]
    LineNotFound { index: usize },

    /// No registry entry exists under the given reference.
    #[error("Price entry not found: {reference}")]
    EntryNotFound { reference: String },

    /// The registry entry exists but was deactivated.
    #[error("Price entry {reference} is inactive")]
    EntryInactive { reference: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input does not meet requirements. Each
/// variant names the offending field; the gate reports the FIRST failing
/// field and stops, so `field` is always a single input.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or positive.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Invalid format (bad characters, conflicting fields).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate registry reference).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// The name of the field that failed, for form highlighting.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::MustBeNonNegative { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
