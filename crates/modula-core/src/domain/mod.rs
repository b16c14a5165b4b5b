// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Modula.
//!
//! This module contains the module-assembly logic with no I/O. Loading
//! descriptors, rendering manifests and writing files are handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or environment reads
//! - **No logging**: Observability belongs to the application and CLI layers
//! - **Immutable outputs**: A `Manifest` is never mutated after assembly
//!
// Public API - what the world sees
pub mod assembler;
pub mod entities;
pub mod environment;
pub mod error;
pub mod naming;
pub mod value_objects;

mod validation;

pub use assembler::assemble;

pub use entities::{
    Configuration, DependencyScope, FileGlobs, InfoPlist, Manifest, ModuleDependencies,
    ModuleDescriptor, PlistValue, Scheme, ScriptPhase, SettingValue, Settings, SettingsDictionary,
    Target, TargetDependency, TargetScript,
    descriptor::{HasName, ModuleDescriptorBuilder, NoName, validate_module_name},
};

pub use environment::{
    CI_SIGNAL_VAR, DeploymentTargets, EnvironmentContext, EnvironmentContextBuilder,
    ci_signal_enabled,
};

pub use error::{DomainError, ErrorCategory};

pub use naming::ModuleNames;

pub use value_objects::{ConfigurationVariant, Destination, ModuleKind, ProductKind, TargetRole};

pub use validation::DomainValidator;
