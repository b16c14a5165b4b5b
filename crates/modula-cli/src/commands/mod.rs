//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into calls on the core
//! [`ManifestService`] and print the results. No assembly logic lives here.

use modula_adapters::{DescriptorLoader, JsonRenderer, LocalFilesystem, SummaryRenderer};
use modula_core::application::{
    ManifestService,
    ports::{Filesystem, ManifestRenderer},
};

use crate::{cli::ManifestFormat, config::AppConfig};

pub mod check;
pub mod completions;
pub mod config;
pub mod env;
pub mod generate;
pub mod init;

/// Renderer adapter for a CLI format choice.
pub(crate) fn renderer_for(format: ManifestFormat) -> Box<dyn ManifestRenderer> {
    match format {
        ManifestFormat::Json => Box::new(JsonRenderer::new()),
        ManifestFormat::Summary => Box::new(SummaryRenderer::new()),
    }
}

/// Wire the service against the on-disk descriptor loader.
pub(crate) fn build_service(
    config: &AppConfig,
    renderer: Box<dyn ManifestRenderer>,
    filesystem: Box<dyn Filesystem>,
) -> ManifestService {
    ManifestService::new(
        Box::new(DescriptorLoader::new()),
        renderer,
        filesystem,
        config.environment_context(),
    )
}

/// Service for commands that only read from disk.
pub(crate) fn read_only_service(config: &AppConfig) -> ManifestService {
    build_service(
        config,
        renderer_for(config.output.format),
        Box::new(LocalFilesystem::new()),
    )
}
