//! # Error Types
//!
//! Structured error types for combo_core. Every failure is raised at the
//! point of call and names the offending value, so a caller (human or
//! program) can see exactly which load, group or factor was rejected.
//!
//! ## Example
//!
//! ```rust
//! use combo_core::errors::{CombError, CombResult};
//!
//! fn check_factor(factor: f64) -> CombResult<()> {
//!     if !factor.is_finite() {
//!         return Err(CombError::invalid_input(
//!             "factor",
//!             factor.to_string(),
//!             "Factor must be a finite number",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_factor(1.2).is_ok());
//! assert!(check_factor(f64::NAN).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for combo_core operations
pub type CombResult<T> = Result<T, CombError>;

/// Structured error type for load combination operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CombError {
    /// A load with this number is already present and cannot be added again
    #[error("Duplicate load {load_no}: {reason}")]
    DuplicateLoad { load_no: u32, reason: String },

    /// A load or load factor required by the operation is not present
    #[error("Load not found: {key}")]
    LoadNotFound { key: String },

    /// A group with the same name or abbreviation is already registered
    #[error("Group already exists: {group_name}")]
    GroupExists { group_name: String },

    /// A group required by the operation is not present
    #[error("Group not found: {key}")]
    GroupNotFound { key: String },

    /// A load case with the same name or number is already registered
    #[error("Load case already exists: {case_name}")]
    CaseExists { case_name: String },

    /// A load case required by the operation is not present
    #[error("Load case not found: {key}")]
    CaseNotFound { key: String },

    /// A (group, factor) pairing is not well formed
    #[error("Invalid combination factor for group '{group_name}': {value} - {reason}")]
    InvalidCombinationFactor {
        group_name: String,
        value: String,
        reason: String,
    },

    /// An input value is out of its domain (angles, interpolation offsets,
    /// symmetry factors, ambiguous group definitions, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Settings file could not be parsed
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file could not be read
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl CombError {
    /// Create a DuplicateLoad error
    pub fn duplicate_load(load_no: u32, reason: impl Into<String>) -> Self {
        CombError::DuplicateLoad {
            load_no,
            reason: reason.into(),
        }
    }

    /// Create a LoadNotFound error
    pub fn load_not_found(key: impl Into<String>) -> Self {
        CombError::LoadNotFound { key: key.into() }
    }

    /// Create a GroupExists error
    pub fn group_exists(group_name: impl Into<String>) -> Self {
        CombError::GroupExists {
            group_name: group_name.into(),
        }
    }

    /// Create a GroupNotFound error
    pub fn group_not_found(key: impl Into<String>) -> Self {
        CombError::GroupNotFound { key: key.into() }
    }

    /// Create a CaseExists error
    pub fn case_exists(case_name: impl Into<String>) -> Self {
        CombError::CaseExists {
            case_name: case_name.into(),
        }
    }

    /// Create a CaseNotFound error
    pub fn case_not_found(key: impl Into<String>) -> Self {
        CombError::CaseNotFound { key: key.into() }
    }

    /// Create an InvalidCombinationFactor error
    pub fn invalid_combination_factor(
        group_name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CombError::InvalidCombinationFactor {
            group_name: group_name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CombError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CombError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for the "something is missing" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CombError::LoadNotFound { .. } | CombError::GroupNotFound { .. } | CombError::CaseNotFound { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CombError::DuplicateLoad { .. } => "DUPLICATE_LOAD",
            CombError::LoadNotFound { .. } => "LOAD_NOT_FOUND",
            CombError::GroupExists { .. } => "GROUP_EXISTS",
            CombError::GroupNotFound { .. } => "GROUP_NOT_FOUND",
            CombError::CaseExists { .. } => "CASE_EXISTS",
            CombError::CaseNotFound { .. } => "CASE_NOT_FOUND",
            CombError::InvalidCombinationFactor { .. } => "INVALID_COMBINATION_FACTOR",
            CombError::InvalidInput { .. } => "INVALID_INPUT",
            CombError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CombError::FileError { .. } => "FILE_ERROR",
        }
    }
}
