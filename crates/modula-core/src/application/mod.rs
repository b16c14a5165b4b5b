//! Application layer for Modula.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ManifestService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All assembly rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{GeneratedManifest, ManifestService, ManifestSummary};

// Re-export port traits (for adapter implementation)
pub use ports::{DescriptorSource, Filesystem, ManifestRenderer};

pub use error::ApplicationError;
