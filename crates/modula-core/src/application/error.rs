//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No descriptor exists at the given path.
    #[error("No module descriptor at {path}")]
    DescriptorNotFound { path: PathBuf },

    /// A descriptor exists but could not be parsed or converted.
    #[error("Invalid module descriptor {path}: {reason}")]
    DescriptorLoad { path: PathBuf, reason: String },

    /// A descriptor could not be serialized.
    #[error("Failed to encode descriptor for '{module}': {reason}")]
    DescriptorEncode { module: String, reason: String },

    /// A directory was searched and contained no descriptors.
    #[error("No modules found under {path}")]
    NoModulesFound { path: PathBuf },

    /// Manifest rendering failed.
    #[error("Manifest rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Output file already exists and overwriting was not requested.
    #[error("Output already exists at {path}")]
    OutputExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DescriptorNotFound { path } => vec![
                format!("Nothing to load at: {}", path.display()),
                "Point at a module.toml file or a directory containing one".into(),
                "Try: modula init <Name> to create a starter descriptor".into(),
            ],
            Self::DescriptorLoad { path, .. } => vec![
                format!("Fix the descriptor at: {}", path.display()),
                "Try: modula check <path> to validate without writing".into(),
            ],
            Self::NoModulesFound { path } => vec![
                format!("No module.toml below: {}", path.display()),
                "Hidden directories and target/ are skipped during discovery".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::OutputExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite".into(),
                "Or choose a different --output directory".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DescriptorNotFound { .. } | Self::NoModulesFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::DescriptorLoad { .. }
            | Self::ValidationFailed(_)
            | Self::OutputExists { .. } => ErrorCategory::Validation,
            Self::DescriptorEncode { .. }
            | Self::RenderingFailed { .. }
            | Self::FilesystemError { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}
