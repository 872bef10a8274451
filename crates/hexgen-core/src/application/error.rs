//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not naming or
//! modelling rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// One spec document could not be parsed. Non-fatal for a run.
    #[error("Failed to parse spec {path}: {reason}")]
    SpecParse { path: PathBuf, reason: String },

    /// The spec directory itself is missing or unreadable.
    #[error("Spec directory {path} is unreadable: {reason}")]
    SpecDirectoryUnreadable { path: PathBuf, reason: String },

    /// Rendering one artifact failed (missing template, bad substitution).
    #[error("Template '{template}' failed to render: {reason}")]
    TemplateRender { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// In-memory store access failed (lock poisoned).
    #[error("Store lock poisoned")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SpecParse { path, .. } => vec![
                format!("Check that {} is valid JSON or YAML", path.display()),
                "The file was skipped; other specs were still processed".into(),
            ],
            Self::SpecDirectoryUnreadable { path, .. } => vec![
                format!("Directory not found or not readable: {}", path.display()),
                "Set [paths] specs_dir in hexgen.toml or pass --specs".into(),
            ],
            Self::TemplateRender { template, .. } => vec![
                format!("Template '{}' could not be rendered", template),
                "If you override templates, check the file for syntax errors".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::StoreLockError => vec![
                "An internal store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::ValidationFailed(_) => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SpecParse { .. } | Self::ValidationFailed(_) => ErrorCategory::Validation,
            Self::SpecDirectoryUnreadable { .. } => ErrorCategory::NotFound,
            Self::TemplateRender { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
