//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `modula-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Manifest, ModuleDescriptor};
use crate::error::ModulaResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `modula_adapters::filesystem::LocalFilesystem` (production)
/// - `modula_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ModulaResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ModulaResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ModulaResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> ModulaResult<()>;
}

/// Port for turning a manifest into text.
///
/// Implemented by:
/// - `modula_adapters::renderer::JsonRenderer` (machine-readable)
/// - `modula_adapters::renderer::SummaryRenderer` (human-readable tree)
#[cfg_attr(test, mockall::automock)]
pub trait ManifestRenderer: Send + Sync {
    /// Render a manifest.
    fn render(&self, manifest: &Manifest) -> ModulaResult<String>;

    /// File extension (without the dot) for written manifests.
    fn file_extension(&self) -> &'static str;
}

/// Port for reading and writing module descriptors.
///
/// Implemented by `modula_adapters::DescriptorLoader` (`module.toml`).
#[cfg_attr(test, mockall::automock)]
pub trait DescriptorSource: Send + Sync {
    /// Load every descriptor at `path`.
    ///
    /// A file yields one descriptor; a directory yields every descriptor
    /// found beneath it, in a stable order.
    fn load(&self, path: &Path) -> ModulaResult<Vec<ModuleDescriptor>>;

    /// Serialize a descriptor in the format `load` reads.
    fn encode(&self, descriptor: &ModuleDescriptor) -> ModulaResult<String>;

    /// File name a descriptor is stored under inside its module directory.
    fn file_name(&self) -> &'static str;
}
