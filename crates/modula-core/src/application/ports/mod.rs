//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `modula-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `DescriptorSource`: Descriptor loading and encoding
//!   - `ManifestRenderer`: Manifest rendering
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

#[cfg(test)]
pub use output::{MockDescriptorSource, MockFilesystem, MockManifestRenderer};
pub use output::{DescriptorSource, Filesystem, ManifestRenderer};
