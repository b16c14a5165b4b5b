//! `modula check`: validate descriptors without rendering anything.

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::CheckArgs, commands::read_only_service, config::AppConfig, error::CliResult,
    output::OutputManager,
};

/// Execute the `modula check` command.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = read_only_service(&config);
    let summaries = service.check(&args.path)?;

    if output.is_json() {
        let report: Vec<_> = summaries
            .iter()
            .map(|s| {
                json!({
                    "module": s.module,
                    "targets": s.targets,
                    "schemes": s.schemes,
                })
            })
            .collect();
        output.emit_json(&report)?;
        return Ok(());
    }

    for summary in &summaries {
        output.success(&format!(
            "{}: {} target(s), {} scheme(s)",
            summary.module,
            summary.targets.len(),
            summary.schemes.len()
        ))?;
        output.print(&format!("    targets: {}", summary.targets.join(", ")))?;
        output.print(&format!("    schemes: {}", summary.schemes.join(", ")))?;
    }
    output.header(&format!("{} module(s) valid", summaries.len()))?;
    Ok(())
}
