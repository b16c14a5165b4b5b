//! Modula Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Modula
//! module manifest generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           modula-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ManifestService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Source, Filesystem, Renderer)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    modula-adapters (Infrastructure)     │
//! │ (DescriptorLoader, JsonRenderer, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (ModuleDescriptor, assemble, Manifest) │
//! │              No I/O                     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use modula_core::domain::{EnvironmentContext, ModuleDescriptor, ModuleKind, assemble};
//!
//! let descriptor = ModuleDescriptor::builder()
//!     .name("Login")
//!     .kinds([ModuleKind::Interface, ModuleKind::UnitTests])
//!     .build()
//!     .unwrap();
//!
//! let manifest = assemble(&descriptor, &EnvironmentContext::default()).unwrap();
//! assert_eq!(manifest.targets().len(), 3);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GeneratedManifest, ManifestService, ManifestSummary,
        ports::{DescriptorSource, Filesystem, ManifestRenderer},
    };
    pub use crate::domain::{
        DependencyScope, Destination, EnvironmentContext, Manifest, ModuleDescriptor, ModuleKind,
        ProductKind, Scheme, Target, TargetDependency, TargetRole, assemble,
    };
    pub use crate::error::{ModulaError, ModulaResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
