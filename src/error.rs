//! Custom error types for splitbook
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for splitbook operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors (budget files, settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Validation errors for data models and manual entry
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Required CSV columns absent from an import file
    #[error("Import error: missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Administrative access denied
    #[error("Administrator access denied")]
    Unauthorized,
}

impl LedgerError {
    /// Create a "not found" error for projects
    pub fn project_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for projects
    pub fn duplicate_project(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for categories
    pub fn duplicate_category(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an import error (including missing columns)
    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_) | Self::MissingColumns { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for splitbook operations
pub type LedgerResult<T> = Result<T, LedgerError>;
