//! # Error Types
//!
//! Structured error types for biocalc_core.
//!
//! The engine follows a two-tier policy: the only hard failure during a
//! calculation is [`CalcError::ReferenceDataMissing`] for a biomass with no
//! calorific-value record. Every other missing reference entry degrades to a
//! documented default (see [`crate::reference`]) and is reported through
//! `tracing` rather than an error.
//!
//! ## Example
//!
//! ```rust
//! use biocalc_core::errors::CalcError;
//!
//! let err = CalcError::reference_data_missing("biomass_properties", "Bagaço de Cana");
//! assert_eq!(err.error_code(), "REFERENCE_DATA_MISSING");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for biocalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine and persistence operations.
///
/// Each variant provides specific context about what went wrong, and the
/// whole enum serializes cleanly so API layers can forward it as JSON.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A reference table has no entry for a key that cannot be defaulted.
    ///
    /// Raised only when the project's biomass has no calorific-value record;
    /// all other missing factors resolve to documented defaults.
    #[error("Reference data missing: no '{key}' entry in table '{table}'")]
    ReferenceDataMissing { table: String, key: String },

    /// A reference dataset failed to parse or validate at load time.
    #[error("Invalid reference dataset: {reason}")]
    DatasetError { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create a ReferenceDataMissing error
    pub fn reference_data_missing(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::ReferenceDataMissing {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a DatasetError
    pub fn dataset(reason: impl Into<String>) -> Self {
        CalcError::DatasetError {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::ReferenceDataMissing { .. } => "REFERENCE_DATA_MISSING",
            CalcError::DatasetError { .. } => "DATASET_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::reference_data_missing("biomass_properties", "Serragem");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::dataset("bad toml").error_code(),
            "DATASET_ERROR"
        );
        assert_eq!(
            CalcError::reference_data_missing("t", "k").error_code(),
            "REFERENCE_DATA_MISSING"
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(CalcError::file_locked("p", "user", "now").is_recoverable());
        assert!(!CalcError::dataset("x").is_recoverable());
    }
}
