//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate manifests" or "check modules".

pub mod manifest_service;

pub use manifest_service::{GeneratedManifest, ManifestService, ManifestSummary};
