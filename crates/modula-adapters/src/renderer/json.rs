//! JSON renderer for downstream manifest tooling.

use modula_core::{
    application::{ApplicationError, ports::ManifestRenderer},
    domain::Manifest,
    error::ModulaResult,
};
use tracing::instrument;

/// Renders a manifest as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    compact: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self { compact: true }
    }
}

impl ManifestRenderer for JsonRenderer {
    #[instrument(skip_all, fields(manifest = %manifest.name()))]
    fn render(&self, manifest: &Manifest) -> ModulaResult<String> {
        let result = if self.compact {
            serde_json::to_string(manifest)
        } else {
            serde_json::to_string_pretty(manifest)
        };

        let mut rendered = result.map_err(|e| ApplicationError::RenderingFailed {
            reason: e.to_string(),
        })?;
        rendered.push('\n');
        Ok(rendered)
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modula_core::domain::{EnvironmentContext, ModuleDescriptor, ModuleKind, assemble};
    use serde_json::Value;

    fn manifest() -> Manifest {
        let d = ModuleDescriptor::builder()
            .name("Login")
            .kinds([ModuleKind::Interface, ModuleKind::UnitTests, ModuleKind::Demo])
            .build()
            .unwrap();
        assemble(&d, &EnvironmentContext::default()).unwrap()
    }

    #[test]
    fn renders_targets_in_order() {
        let out = JsonRenderer::new().render(&manifest()).unwrap();
        let json: Value = serde_json::from_str(&out).unwrap();

        let names: Vec<&str> = json["targets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["LoginInterface", "Login", "LoginTests", "LoginDemo"]);
        assert_eq!(json["schemes"][1]["buildTarget"], "LoginDemo");
    }

    #[test]
    fn renders_settings_and_plist() {
        let out = JsonRenderer::new().render(&manifest()).unwrap();
        let json: Value = serde_json::from_str(&out).unwrap();

        let main = &json["targets"][1];
        assert_eq!(main["settings"]["base"]["OTHER_LDFLAGS"], "$(inherited) -all_load");
        assert_eq!(main["infoPlist"]["kind"], "default");
        assert_eq!(main["scripts"][0]["name"], "Lint");

        let demo = &json["targets"][3];
        assert_eq!(demo["infoPlist"]["kind"], "extending");
        assert_eq!(
            demo["infoPlist"]["entries"]["UIApplicationSupportsIndirectInputEvents"],
            true
        );
    }

    #[test]
    fn compact_output_is_single_line() {
        let out = JsonRenderer::compact().render(&manifest()).unwrap();
        assert_eq!(out.trim_end().lines().count(), 1);
        assert_eq!(JsonRenderer::compact().file_extension(), "json");
    }
}
