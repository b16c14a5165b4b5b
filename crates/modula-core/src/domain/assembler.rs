//! Module assembly: descriptor + environment → manifest.
//!
//! Every optional target is produced by its own helper returning
//! `Option<Target>`, and the manifest is composed by appending those results
//! in the fixed order interface → main → testing → unit tests → UI tests →
//! demo. Names are always derived through [`ModuleNames`], both when a target
//! is created and when it is referenced.
//!
//! # Domain purity
//!
//! No I/O and no logging. The same inputs always yield the same manifest.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    entities::{
        Configuration, DependencyScope, InfoPlist, Manifest, ModuleDescriptor, PlistValue, Scheme,
        Settings, Target, TargetDependency,
    },
    environment::EnvironmentContext,
    error::DomainError,
    naming::{self, ModuleNames},
    validation::DomainValidator,
    value_objects::{Destination, ModuleKind, ProductKind, TargetRole},
};

/// Assemble the manifest for one module.
///
/// The descriptor is re-validated first; the resulting manifest is checked
/// before it is returned, so a partially valid manifest never escapes.
pub fn assemble(
    descriptor: &ModuleDescriptor,
    env: &EnvironmentContext,
) -> Result<Manifest, DomainError> {
    DomainValidator::validate_descriptor(descriptor)?;

    let manifest = ModuleAssembler::new(descriptor, env).assemble();

    DomainValidator::validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Per-call assembly state. Everything here is derived once from the inputs
/// and only read afterwards.
struct ModuleAssembler<'a> {
    descriptor: &'a ModuleDescriptor,
    env: &'a EnvironmentContext,
    names: ModuleNames,
    settings: Settings,
    destinations: BTreeSet<Destination>,
    emits_testing: bool,
}

impl<'a> ModuleAssembler<'a> {
    fn new(descriptor: &'a ModuleDescriptor, env: &'a EnvironmentContext) -> Self {
        Self {
            descriptor,
            env,
            names: ModuleNames::new(descriptor.name()),
            settings: module_settings(descriptor, env),
            destinations: descriptor
                .destinations()
                .cloned()
                .unwrap_or_else(|| env.destinations().clone()),
            emits_testing: descriptor.requests(ModuleKind::Testing)
                && descriptor.requests(ModuleKind::Interface),
        }
    }

    fn assemble(self) -> Manifest {
        let targets = [
            self.interface_target(),
            Some(self.main_target()),
            self.testing_target(),
            self.unit_test_target(),
            self.ui_test_target(),
            self.demo_target(),
        ]
        .into_iter()
        .flatten()
        .collect();

        Manifest {
            name: self.names.module().to_string(),
            organization: self.env.organization().to_string(),
            targets,
            schemes: self.schemes(),
            additional_files: self.descriptor.additional_files().clone(),
        }
    }

    // ── Targets ───────────────────────────────────────────────────────────────

    fn interface_target(&self) -> Option<Target> {
        if !self.descriptor.requests(ModuleKind::Interface) {
            return None;
        }
        Some(self.target(
            TargetRole::Interface,
            ProductKind::Framework,
            self.scoped(DependencyScope::Interface),
        ))
    }

    fn main_target(&self) -> Target {
        let mut dependencies = self.descriptor.dependencies().baseline();
        if self.descriptor.requests(ModuleKind::Interface) {
            dependencies.push(self.reference(TargetRole::Interface));
        }

        let mut target = self.target(TargetRole::Main, self.descriptor.product(), dependencies);
        target.sources = self.descriptor.sources().clone();
        target.resources = self.descriptor.resources().clone();
        target.info_plist = InfoPlist::extending(self.descriptor.plist().clone());
        if !self.env.is_ci() {
            target.scripts.extend(self.env.lint_script().cloned());
        }
        target
    }

    fn testing_target(&self) -> Option<Target> {
        if !self.emits_testing {
            return None;
        }
        let mut dependencies = vec![self.reference(TargetRole::Interface)];
        dependencies.extend(self.scoped(DependencyScope::Testing));
        Some(self.target(TargetRole::Testing, ProductKind::Framework, dependencies))
    }

    /// What both test bundles exercise: the demo app when there is one,
    /// otherwise the module, plus the testing doubles when emitted.
    fn test_dependencies(&self) -> Vec<TargetDependency> {
        let subject = if self.descriptor.requests(ModuleKind::Demo) {
            TargetRole::Demo
        } else {
            TargetRole::Main
        };

        let mut dependencies = vec![self.reference(subject)];
        if self.emits_testing {
            dependencies.push(self.reference(TargetRole::Testing));
        }
        dependencies
    }

    fn unit_test_target(&self) -> Option<Target> {
        if !self.descriptor.requests(ModuleKind::UnitTests) {
            return None;
        }
        let mut dependencies = self.test_dependencies();
        dependencies.extend(self.scoped(DependencyScope::UnitTests));
        Some(self.target(TargetRole::UnitTests, ProductKind::UnitTests, dependencies))
    }

    fn ui_test_target(&self) -> Option<Target> {
        if !self.descriptor.requests(ModuleKind::UiTests) {
            return None;
        }
        let mut dependencies = self.test_dependencies();
        dependencies.extend(self.scoped(DependencyScope::UiTests));
        Some(self.target(TargetRole::UiTests, ProductKind::UiTests, dependencies))
    }

    fn demo_target(&self) -> Option<Target> {
        if !self.descriptor.requests(ModuleKind::Demo) {
            return None;
        }
        let mut dependencies = self.scoped(DependencyScope::Demo);
        dependencies.push(self.reference(TargetRole::Main));
        if self.emits_testing {
            dependencies.push(self.reference(TargetRole::Testing));
        }

        let mut target = self.target(TargetRole::Demo, ProductKind::App, dependencies);
        target.resources = naming::demo_resources();
        target.info_plist = InfoPlist::extending(demo_plist());
        Some(target)
    }

    // ── Schemes ───────────────────────────────────────────────────────────────

    fn schemes(&self) -> Vec<Scheme> {
        let test_target = self
            .descriptor
            .requests(ModuleKind::UnitTests)
            .then(|| self.names.target(TargetRole::UnitTests));
        let configuration = self
            .settings
            .primary_configuration()
            .unwrap_or_default()
            .to_string();

        let mut schemes = vec![Scheme {
            name: self.names.primary_scheme(),
            build_target: self.names.target(TargetRole::Main),
            test_target: test_target.clone(),
            code_coverage: true,
            configuration: configuration.clone(),
        }];

        if self.descriptor.requests(ModuleKind::Demo) {
            schemes.push(Scheme {
                name: self.names.demo_scheme(),
                build_target: self.names.target(TargetRole::Demo),
                test_target,
                code_coverage: true,
                configuration,
            });
        }
        schemes
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// A target with the role's conventional name, bundle id and sources.
    fn target(
        &self,
        role: TargetRole,
        product: ProductKind,
        dependencies: Vec<TargetDependency>,
    ) -> Target {
        let name = self.names.target(role);
        Target {
            bundle_id: naming::bundle_id(self.env.organization(), &name),
            name,
            role,
            product,
            destinations: self.destinations.clone(),
            deployment_targets: self.env.deployment_targets().clone(),
            sources: naming::default_sources(role),
            resources: Vec::new(),
            info_plist: InfoPlist::Default,
            scripts: Vec::new(),
            dependencies,
            settings: self.settings.clone(),
        }
    }

    fn reference(&self, role: TargetRole) -> TargetDependency {
        TargetDependency::target(self.names.target(role))
    }

    fn scoped(&self, scope: DependencyScope) -> Vec<TargetDependency> {
        self.descriptor.dependencies().get(scope).to_vec()
    }
}

/// Effective settings shared by every target of the module.
fn module_settings(descriptor: &ModuleDescriptor, env: &EnvironmentContext) -> Settings {
    let configurations = descriptor
        .configurations()
        .map(<[Configuration]>::to_vec)
        .unwrap_or_else(Configuration::default_set);

    Settings::merged(
        [
            env.base_settings(),
            env.code_sign_settings(),
            descriptor.settings(),
        ],
        descriptor.product(),
        configurations,
    )
}

fn demo_plist() -> BTreeMap<String, PlistValue> {
    BTreeMap::from([
        (
            "UILaunchScreen".to_string(),
            PlistValue::Dictionary(BTreeMap::new()),
        ),
        (
            "UIApplicationSupportsIndirectInputEvents".to_string(),
            PlistValue::Bool(true),
        ),
        (
            "UISupportedInterfaceOrientations".to_string(),
            PlistValue::Array(vec![PlistValue::from("UIInterfaceOrientationPortrait")]),
        ),
    ])
}
