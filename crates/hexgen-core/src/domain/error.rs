// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (collected into run summaries)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid base package '{package}': {reason}")]
    InvalidBasePackage { package: String, reason: String },

    #[error("Invalid naming input: {0}")]
    InvalidNamingInput(String),

    #[error("Invalid project settings: {0}")]
    InvalidSettings(String),

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    #[error("Schema for entity '{entity}' could not be resolved: {reason}")]
    SchemaResolution { entity: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidBasePackage { package, .. } => vec![
                format!("'{}' is not a valid Java package name", package),
                "Use dot-separated lowercase identifiers, e.g. com.example.users".into(),
                "Set it under [project] base_package in hexgen.toml or pass --base-package".into(),
            ],
            Self::SchemaResolution { entity, .. } => vec![
                format!("Check the response schema for '{}' in your specs", entity),
                format!("Expected '{0}Response' or 'Get{0}ResponseContent' of type object", entity),
            ],
            Self::InvalidSettings(msg) => vec![
                format!("Details: {}", msg),
                "Try: hexgen init to write a fresh hexgen.toml".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
            Self::InvalidNamingInput(_) => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidBasePackage { .. }
            | Self::InvalidNamingInput(_)
            | Self::InvalidSettings(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::SchemaResolution { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
