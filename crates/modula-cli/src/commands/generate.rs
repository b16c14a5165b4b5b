//! `modula generate`: assemble descriptors and render their manifests.
//!
//! Without `--output` the rendered manifests go to stdout. With `--output`
//! each module is written to `<DIR>/<Name>.manifest.<ext>`; `--dry-run`
//! routes those writes into an in-memory filesystem instead.

use tracing::{debug, info, instrument};

use modula_adapters::{LocalFilesystem, MemoryFilesystem};
use modula_core::application::ports::Filesystem;

use crate::{
    cli::GenerateArgs,
    commands::{build_service, renderer_for},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `modula generate` command.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let format = args.format.unwrap_or(config.output.format);
    debug!(%format, dry_run = args.dry_run, "Generating manifests");

    let filesystem: Box<dyn Filesystem> = if args.dry_run {
        Box::new(MemoryFilesystem::new())
    } else {
        Box::new(LocalFilesystem::new())
    };
    let service = build_service(&config, renderer_for(format), filesystem);

    let generated = service.generate(&args.path)?;

    let Some(dir) = args.output else {
        for (i, entry) in generated.iter().enumerate() {
            if i > 0 {
                output.emit("")?;
            }
            output.emit(&entry.rendered)?;
        }
        return Ok(());
    };

    if args.dry_run {
        // in-memory writes: the planned paths without touching the disk
        let planned = service.write(&generated, &dir, true)?;
        output.info(&format!(
            "Dry run: would write {} manifest(s) to {}",
            planned.len(),
            dir.display()
        ))?;
        for (path, entry) in planned.iter().zip(&generated) {
            if path.exists() && !args.force {
                output.warning(&format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))?;
            } else {
                output.print(&format!(
                    "  {}  ({} targets)",
                    path.display(),
                    entry.manifest.targets().len()
                ))?;
            }
        }
        return Ok(());
    }

    let written = service.write(&generated, &dir, args.force)?;
    for path in &written {
        output.success(&format!("Wrote {}", path.display()))?;
    }
    info!(count = written.len(), "Manifests written");
    Ok(())
}
