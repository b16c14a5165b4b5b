//! Human-readable text summary of a manifest.

use std::fmt::{self, Write};

use modula_core::{
    application::{ApplicationError, ports::ManifestRenderer},
    domain::{Manifest, Scheme, Target},
    error::ModulaResult,
};

/// Renders a manifest as an indented tree of targets and schemes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestRenderer for SummaryRenderer {
    fn render(&self, manifest: &Manifest) -> ModulaResult<String> {
        let mut out = String::new();
        write_manifest(&mut out, manifest).map_err(|e| ApplicationError::RenderingFailed {
            reason: e.to_string(),
        })?;
        Ok(out)
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

fn write_manifest(out: &mut String, manifest: &Manifest) -> fmt::Result {
    writeln!(out, "{} ({})", manifest.name(), manifest.organization())?;

    let count = manifest.targets().len();
    for (i, target) in manifest.targets().iter().enumerate() {
        write_target(out, target, i + 1 == count)?;
    }

    writeln!(out, "schemes:")?;
    for scheme in manifest.schemes() {
        write_scheme(out, scheme)?;
    }

    if !manifest.additional_files().is_empty() {
        writeln!(out, "additional files: {}", manifest.additional_files().join(", "))?;
    }
    Ok(())
}

fn write_target(out: &mut String, target: &Target, last: bool) -> fmt::Result {
    let (branch, rail) = if last { ("└──", "   ") } else { ("├──", "│  ") };

    writeln!(out, "{branch} {}  [{}] {}", target.name(), target.role(), target.product())?;
    writeln!(out, "{rail} bundle: {}", target.bundle_id())?;

    let dependencies: Vec<String> = target.dependencies().iter().map(ToString::to_string).collect();
    writeln!(out, "{rail} deps:   {}", list_or_dash(&dependencies))?;

    if !target.sources().is_empty() {
        writeln!(out, "{rail} srcs:   {}", target.sources().join(", "))?;
    }
    if !target.scripts().is_empty() {
        let scripts: Vec<&str> = target.scripts().iter().map(|s| s.name.as_str()).collect();
        writeln!(out, "{rail} script: {}", scripts.join(", "))?;
    }
    Ok(())
}

fn write_scheme(out: &mut String, scheme: &Scheme) -> fmt::Result {
    writeln!(
        out,
        "  {}: build {}, test {}, config {}, coverage {}",
        scheme.name,
        scheme.build_target,
        scheme.test_target.as_deref().unwrap_or("-"),
        scheme.configuration,
        if scheme.code_coverage { "on" } else { "off" }
    )
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
