//! A single buildable unit of an assembled manifest.
//!
//! Targets are produced only by the assembler. They contain no business
//! logic, only data, and serialize directly into the rendered manifest.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::domain::{
    entities::{
        common::{FileGlobs, InfoPlist, TargetScript},
        dependency::TargetDependency,
        settings::Settings,
    },
    environment::DeploymentTargets,
    error::DomainError,
    value_objects::{Destination, ProductKind, TargetRole},
};

/// One target of a manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub(crate) name: String,
    pub(crate) role: TargetRole,
    pub(crate) product: ProductKind,
    pub(crate) bundle_id: String,
    pub(crate) destinations: BTreeSet<Destination>,
    pub(crate) deployment_targets: DeploymentTargets,
    pub(crate) sources: FileGlobs,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) resources: FileGlobs,
    pub(crate) info_plist: InfoPlist,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) scripts: Vec<TargetScript>,
    pub(crate) dependencies: Vec<TargetDependency>,
    pub(crate) settings: Settings,
}

impl Target {
    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn role(&self) -> TargetRole {
        self.role
    }
    pub const fn product(&self) -> ProductKind {
        self.product
    }
    pub fn bundle_id(&self) -> &str {
        &self.bundle_id
    }
    pub fn destinations(&self) -> &BTreeSet<Destination> {
        &self.destinations
    }
    pub fn deployment_targets(&self) -> &DeploymentTargets {
        &self.deployment_targets
    }
    pub fn sources(&self) -> &FileGlobs {
        &self.sources
    }
    pub fn resources(&self) -> &FileGlobs {
        &self.resources
    }
    pub fn info_plist(&self) -> &InfoPlist {
        &self.info_plist
    }
    pub fn scripts(&self) -> &[TargetScript] {
        &self.scripts
    }
    pub fn dependencies(&self) -> &[TargetDependency] {
        &self.dependencies
    }
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Names of in-manifest targets this target depends on.
    pub fn local_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().filter_map(|d| d.local_target())
    }

    pub fn depends_on(&self, target: &str) -> bool {
        self.local_dependencies().any(|name| name == target)
    }

    /// Check the target on its own; cross-target rules live on the manifest.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::InvalidManifest("target name is empty".into()));
        }
        if self.bundle_id.is_empty() {
            return Err(DomainError::InvalidManifest(format!(
                "target '{}' has no bundle identifier",
                self.name
            )));
        }
        if self.depends_on(&self.name) {
            return Err(DomainError::InvalidManifest(format!(
                "target '{}' depends on itself",
                self.name
            )));
        }
        if self.settings.configurations.is_empty() {
            return Err(DomainError::InvalidManifest(format!(
                "target '{}' has no configurations",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({})", self.name, self.role, self.product)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::entities::settings::Configuration;

    /// A minimal valid framework target.
    pub fn target(name: &str, role: TargetRole) -> Target {
        Target {
            name: name.to_string(),
            role,
            product: ProductKind::Framework,
            bundle_id: format!("io.modula.{name}"),
            destinations: BTreeSet::from([Destination::Iphone]),
            deployment_targets: DeploymentTargets::ios("16.0"),
            sources: vec!["Sources/**".into()],
            resources: Vec::new(),
            info_plist: InfoPlist::Default,
            scripts: Vec::new(),
            dependencies: Vec::new(),
            settings: Settings {
                base: Default::default(),
                configurations: Configuration::default_set(),
            },
        }
    }
}
