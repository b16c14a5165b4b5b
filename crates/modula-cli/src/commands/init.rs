//! `modula init`: write a starter `module.toml`.

use tracing::instrument;

use modula_adapters::LocalFilesystem;
use modula_core::domain::{ModuleDescriptor, ProductKind};

use crate::{
    cli::InitArgs,
    commands::{build_service, renderer_for},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Create `<dir>/<Name>/module.toml` from the requested kinds.
#[instrument(skip_all, fields(module = %args.name))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let descriptor = ModuleDescriptor::builder()
        .name(&args.name)
        .product(args.product.unwrap_or(ProductKind::Framework))
        .kinds(args.with.iter().copied())
        .build()
        .map_err(modula_core::error::ModulaError::from)?;

    let service = build_service(
        &config,
        renderer_for(config.output.format),
        Box::new(LocalFilesystem::new()),
    );
    let path = service.init(&descriptor, &args.dir, args.force)?;

    output.success(&format!("Created {}", path.display()))?;
    if let Some(module_dir) = path.parent() {
        output.info(&format!(
            "Next: add sources under {}/Sources, then run `modula generate {}`",
            module_dir.display(),
            module_dir.display()
        ))?;
    }
    Ok(())
}
