//! # Error Types
//!
//! Structured error types for o86_core. Every rejection a design check can
//! produce is a variant here, so callers can tell an invalid input apart from
//! a code-mandated limit or a property-table miss.
//!
//! ## Example
//!
//! ```rust
//! use o86_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "span_m".to_string(),
//!             value: span_m.to_string(),
//!             reason: "Span must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for o86_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design-check operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is out of its numeric domain
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Key not present in a property table
    #[error("Property not found in {table}: '{key}'")]
    PropertyNotFound { table: String, key: String },

    /// A categorical string that maps to no known variant
    #[error("Unknown {field}: '{value}'")]
    UnknownSelection { field: String, value: String },

    /// The configuration is outside what the code clause permits
    /// (slenderness, unstable supports, minimum fire section, ...)
    #[error("Code limit exceeded ({clause}): {reason}")]
    CodeLimitExceeded { clause: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON or TOML (de)serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a PropertyNotFound error
    pub fn property_not_found(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::PropertyNotFound {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create an UnknownSelection error
    pub fn unknown_selection(field: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::UnknownSelection {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a CodeLimitExceeded error
    pub fn code_limit(clause: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CodeLimitExceeded {
            clause: clause.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the input rather than by the
    /// environment (files, tables).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::MissingField { .. }
                | CalcError::UnknownSelection { .. }
                | CalcError::CodeLimitExceeded { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::PropertyNotFound { .. } => "PROPERTY_NOT_FOUND",
            CalcError::UnknownSelection { .. } => "UNKNOWN_SELECTION",
            CalcError::CodeLimitExceeded { .. } => "CODE_LIMIT_EXCEEDED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
