//! Infrastructure adapters for Modula.
//!
//! This crate implements the ports defined in `modula-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod descriptor_loader;
pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use descriptor_loader::{DESCRIPTOR_FILE_NAME, DescriptorLoader};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::{JsonRenderer, SummaryRenderer};
