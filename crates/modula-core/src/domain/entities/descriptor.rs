//! The `ModuleDescriptor` input record and its typestate builder.
//!
//! A descriptor is the caller's high-level description of one feature
//! module. Once built it is validated and immutable: the assembler trusts
//! every precondition checked here.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoName` / `HasName`) so that a
//! module name must be set before anything else can be configured.
//! Cross-field rules (testing needs an interface, local references must
//! resolve) are checked by `validate` at `build()`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::marker::PhantomData;

use crate::domain::{
    entities::{
        common::{FileGlobs, PlistValue},
        dependency::TargetDependency,
        settings::{Configuration, SettingValue, SettingsDictionary},
    },
    error::DomainError,
    naming::{self, ModuleNames},
    value_objects::{Destination, ModuleKind, ProductKind, TargetRole},
};

// ── Dependency scopes ─────────────────────────────────────────────────────────

/// Which list of a descriptor a dependency belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyScope {
    Internal,
    External,
    Interface,
    Testing,
    UnitTests,
    UiTests,
    Demo,
}

impl DependencyScope {
    pub const ALL: [DependencyScope; 7] = [
        Self::Internal,
        Self::External,
        Self::Interface,
        Self::Testing,
        Self::UnitTests,
        Self::UiTests,
        Self::Demo,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Interface => "interface",
            Self::Testing => "testing",
            Self::UnitTests => "unit-tests",
            Self::UiTests => "ui-tests",
            Self::Demo => "demo",
        }
    }

    /// The target whose dependency list this scope feeds.
    pub const fn consumer(self) -> TargetRole {
        match self {
            Self::Internal | Self::External => TargetRole::Main,
            Self::Interface => TargetRole::Interface,
            Self::Testing => TargetRole::Testing,
            Self::UnitTests => TargetRole::UnitTests,
            Self::UiTests => TargetRole::UiTests,
            Self::Demo => TargetRole::Demo,
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The seven ordered dependency lists of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDependencies {
    internal: Vec<TargetDependency>,
    external: Vec<TargetDependency>,
    interface: Vec<TargetDependency>,
    testing: Vec<TargetDependency>,
    unit_tests: Vec<TargetDependency>,
    ui_tests: Vec<TargetDependency>,
    demo: Vec<TargetDependency>,
}

impl ModuleDependencies {
    pub fn get(&self, scope: DependencyScope) -> &[TargetDependency] {
        match scope {
            DependencyScope::Internal => &self.internal,
            DependencyScope::External => &self.external,
            DependencyScope::Interface => &self.interface,
            DependencyScope::Testing => &self.testing,
            DependencyScope::UnitTests => &self.unit_tests,
            DependencyScope::UiTests => &self.ui_tests,
            DependencyScope::Demo => &self.demo,
        }
    }

    fn get_mut(&mut self, scope: DependencyScope) -> &mut Vec<TargetDependency> {
        match scope {
            DependencyScope::Internal => &mut self.internal,
            DependencyScope::External => &mut self.external,
            DependencyScope::Interface => &mut self.interface,
            DependencyScope::Testing => &mut self.testing,
            DependencyScope::UnitTests => &mut self.unit_tests,
            DependencyScope::UiTests => &mut self.ui_tests,
            DependencyScope::Demo => &mut self.demo,
        }
    }

    /// Internal dependencies followed by external ones.
    pub fn baseline(&self) -> Vec<TargetDependency> {
        self.internal
            .iter()
            .chain(self.external.iter())
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        DependencyScope::ALL.iter().all(|s| self.get(*s).is_empty())
    }
}

// ── Descriptor ────────────────────────────────────────────────────────────────

/// A validated description of one feature module.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDescriptor {
    name: String,
    product: ProductKind,
    kinds: BTreeSet<ModuleKind>,
    dependencies: ModuleDependencies,
    sources: FileGlobs,
    resources: FileGlobs,
    settings: SettingsDictionary,
    plist: BTreeMap<String, PlistValue>,
    additional_files: FileGlobs,
    configurations: Option<Vec<Configuration>>,
    destinations: Option<BTreeSet<Destination>>,
}

impl ModuleDescriptor {
    /// Start building a new descriptor.
    pub fn builder() -> ModuleDescriptorBuilder<NoName> {
        ModuleDescriptorBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub const fn product(&self) -> ProductKind {
        self.product
    }
    pub fn kinds(&self) -> &BTreeSet<ModuleKind> {
        &self.kinds
    }
    pub fn requests(&self, kind: ModuleKind) -> bool {
        self.kinds.contains(&kind)
    }
    pub fn dependencies(&self) -> &ModuleDependencies {
        &self.dependencies
    }
    pub fn sources(&self) -> &FileGlobs {
        &self.sources
    }
    pub fn resources(&self) -> &FileGlobs {
        &self.resources
    }
    pub fn settings(&self) -> &SettingsDictionary {
        &self.settings
    }
    pub fn plist(&self) -> &BTreeMap<String, PlistValue> {
        &self.plist
    }
    pub fn additional_files(&self) -> &FileGlobs {
        &self.additional_files
    }
    /// Caller-supplied configuration list, if it replaces the default set.
    pub fn configurations(&self) -> Option<&[Configuration]> {
        self.configurations.as_deref()
    }
    /// Caller-supplied destinations, if they replace the environment's.
    pub fn destinations(&self) -> Option<&BTreeSet<Destination>> {
        self.destinations.as_ref()
    }

    /// Roles the assembler will emit for this descriptor.
    pub fn emitted_roles(&self) -> BTreeSet<TargetRole> {
        let mut roles = BTreeSet::from([TargetRole::Main]);
        for kind in &self.kinds {
            if *kind == ModuleKind::Testing && !self.requests(ModuleKind::Interface) {
                continue;
            }
            roles.insert(kind.role());
        }
        roles
    }

    /// Validate the descriptor's internal consistency.
    ///
    /// Called automatically by the builder. Available for re-validation after
    /// external construction.
    pub fn validate(&self) -> Result<(), DomainError> {
        // 1. Name must be usable as a target stem.
        validate_module_name(&self.name)?;

        // 2. Test bundles are derived, never the module's own product.
        if !self.product.is_module_product() {
            return Err(DomainError::InvalidModuleProduct {
                product: self.product.to_string(),
            });
        }

        // 3. Testing doubles need an interface to double.
        if self.requests(ModuleKind::Testing) && !self.requests(ModuleKind::Interface) {
            return Err(DomainError::TestingRequiresInterface {
                module: self.name.clone(),
            });
        }

        // 4. A configuration override replaces the defaults, so it must be usable.
        if let Some(configurations) = &self.configurations {
            Configuration::validate_set(&self.name, configurations)?;
        }

        // 5. Local references must name a sibling target that will exist.
        self.validate_local_references()?;

        // 6. ...and must not close a loop with the edges the assembler adds.
        self.validate_acyclic()
    }

    /// Edges between the module's own targets that the assembler always adds.
    fn implicit_edges(
        &self,
        emitted: &BTreeSet<TargetRole>,
    ) -> BTreeMap<TargetRole, Vec<TargetRole>> {
        let has = |role: TargetRole| emitted.contains(&role);
        let mut edges: BTreeMap<TargetRole, Vec<TargetRole>> = BTreeMap::new();

        if has(TargetRole::Interface) {
            edges.entry(TargetRole::Main).or_default().push(TargetRole::Interface);
        }
        if has(TargetRole::Testing) {
            edges.entry(TargetRole::Testing).or_default().push(TargetRole::Interface);
        }
        let subject = if has(TargetRole::Demo) {
            TargetRole::Demo
        } else {
            TargetRole::Main
        };
        for test in [TargetRole::UnitTests, TargetRole::UiTests] {
            if !has(test) {
                continue;
            }
            let deps = edges.entry(test).or_default();
            deps.push(subject);
            if has(TargetRole::Testing) {
                deps.push(TargetRole::Testing);
            }
        }
        if has(TargetRole::Demo) {
            let deps = edges.entry(TargetRole::Demo).or_default();
            deps.push(TargetRole::Main);
            if has(TargetRole::Testing) {
                deps.push(TargetRole::Testing);
            }
        }
        edges
    }

    fn validate_acyclic(&self) -> Result<(), DomainError> {
        let names = ModuleNames::new(&self.name);
        let emitted = self.emitted_roles();
        let by_name: BTreeMap<String, TargetRole> =
            emitted.iter().map(|role| (names.target(*role), *role)).collect();

        let mut edges = self.implicit_edges(&emitted);
        let mut local = Vec::new();
        for scope in DependencyScope::ALL {
            for dep in self.dependencies.get(scope) {
                if let Some(role) = dep.local_target().and_then(|r| by_name.get(r)) {
                    edges.entry(scope.consumer()).or_default().push(*role);
                    local.push((scope.consumer(), *role));
                }
            }
        }

        // The implicit graph is acyclic, so every loop runs through a local edge.
        for (consumer, reference) in local {
            if let Some(path) = find_path(&edges, reference, consumer) {
                let cycle: Vec<String> = std::iter::once(consumer)
                    .chain(path)
                    .map(|role| names.target(role))
                    .collect();
                return Err(DomainError::DependencyCycle {
                    module: self.name.clone(),
                    cycle: cycle.join(" -> "),
                });
            }
        }
        Ok(())
    }

    fn validate_local_references(&self) -> Result<(), DomainError> {
        let names = ModuleNames::new(&self.name);
        let emitted: BTreeMap<String, TargetRole> = self
            .emitted_roles()
            .into_iter()
            .map(|role| (names.target(role), role))
            .collect();

        for scope in DependencyScope::ALL {
            for dep in self.dependencies.get(scope) {
                let Some(reference) = dep.local_target() else {
                    continue;
                };
                match emitted.get(reference) {
                    None => {
                        return Err(DomainError::UnresolvedDependency {
                            module: self.name.clone(),
                            reference: reference.to_string(),
                            reason: format!(
                                "no target named '{reference}' is produced by this module"
                            ),
                        });
                    }
                    Some(role) if *role == scope.consumer() => {
                        return Err(DomainError::UnresolvedDependency {
                            module: self.name.clone(),
                            reference: reference.to_string(),
                            reason: format!("the {scope} dependencies belong to that target"),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.product)?;
        if !self.kinds.is_empty() {
            let kinds: Vec<&str> = self.kinds.iter().map(|k| k.as_str()).collect();
            write!(f, " + {}", kinds.join(", "))?;
        }
        Ok(())
    }
}

/// Depth-first search for a path `from -> .. -> to`, both ends included.
fn find_path(
    edges: &BTreeMap<TargetRole, Vec<TargetRole>>,
    from: TargetRole,
    to: TargetRole,
) -> Option<Vec<TargetRole>> {
    let mut stack = vec![vec![from]];
    let mut seen = BTreeSet::new();
    while let Some(path) = stack.pop() {
        let last = *path.last()?;
        if last == to {
            return Some(path);
        }
        if !seen.insert(last) {
            continue;
        }
        for next in edges.get(&last).into_iter().flatten() {
            let mut extended = path.clone();
            extended.push(*next);
            stack.push(extended);
        }
    }
    None
}

/// Check that `name` can stem every derived target name and bundle id.
pub fn validate_module_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidModuleName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let Some(first) = name.chars().next() else {
        return Err(invalid("name cannot be empty"));
    };
    if !first.is_ascii_alphabetic() {
        return Err(invalid("name must start with an ASCII letter"));
    }
    if let Some(bad) = name.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }
    Ok(())
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: name has not yet been set.
pub struct NoName;
/// Marker: name has been set; other fields may now be configured.
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ModuleDescriptor`].
pub struct ModuleDescriptorBuilder<N> {
    name: Option<String>,
    product: ProductKind,
    kinds: BTreeSet<ModuleKind>,
    dependencies: ModuleDependencies,
    sources: Option<FileGlobs>,
    resources: Option<FileGlobs>,
    settings: SettingsDictionary,
    plist: BTreeMap<String, PlistValue>,
    additional_files: FileGlobs,
    configurations: Option<Vec<Configuration>>,
    destinations: Option<BTreeSet<Destination>>,
    _marker: PhantomData<N>,
}

impl ModuleDescriptorBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            name: None,
            product: ProductKind::default(),
            kinds: BTreeSet::new(),
            dependencies: ModuleDependencies::default(),
            sources: None,
            resources: None,
            settings: SettingsDictionary::new(),
            plist: BTreeMap::new(),
            additional_files: FileGlobs::new(),
            configurations: None,
            destinations: None,
            _marker: PhantomData,
        }
    }

    /// Set the module name. This transitions the builder to `HasName`.
    pub fn name(self, name: impl Into<String>) -> ModuleDescriptorBuilder<HasName> {
        ModuleDescriptorBuilder {
            name: Some(name.into()),
            product: self.product,
            kinds: self.kinds,
            dependencies: self.dependencies,
            sources: self.sources,
            resources: self.resources,
            settings: self.settings,
            plist: self.plist,
            additional_files: self.additional_files,
            configurations: self.configurations,
            destinations: self.destinations,
            _marker: PhantomData,
        }
    }
}

impl Default for ModuleDescriptorBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleDescriptorBuilder<HasName> {
    pub fn product(mut self, product: ProductKind) -> Self {
        self.product = product;
        self
    }

    pub fn kind(mut self, kind: ModuleKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn kinds(mut self, kinds: impl IntoIterator<Item = ModuleKind>) -> Self {
        self.kinds.extend(kinds);
        self
    }

    pub fn dependency(mut self, scope: DependencyScope, dependency: TargetDependency) -> Self {
        self.dependencies.get_mut(scope).push(dependency);
        self
    }

    pub fn dependencies(
        mut self,
        scope: DependencyScope,
        dependencies: impl IntoIterator<Item = TargetDependency>,
    ) -> Self {
        self.dependencies.get_mut(scope).extend(dependencies);
        self
    }

    /// Replace the main target's source globs (default `Sources/**`).
    pub fn sources(mut self, globs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sources = Some(globs.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the main target's resource globs (default `Resources/**`).
    pub fn resources(mut self, globs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.resources = Some(globs.into_iter().map(Into::into).collect());
        self
    }

    pub fn setting(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn settings(mut self, settings: SettingsDictionary) -> Self {
        self.settings.extend(settings);
        self
    }

    pub fn plist_entry(mut self, key: impl Into<String>, value: impl Into<PlistValue>) -> Self {
        self.plist.insert(key.into(), value.into());
        self
    }

    pub fn plist(mut self, entries: BTreeMap<String, PlistValue>) -> Self {
        self.plist.extend(entries);
        self
    }

    pub fn additional_files(mut self, globs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.additional_files.extend(globs.into_iter().map(Into::into));
        self
    }

    /// Replace the default dev/stage/prod configurations wholesale.
    pub fn configurations(mut self, configurations: Vec<Configuration>) -> Self {
        self.configurations = Some(configurations);
        self
    }

    /// Replace the environment's destinations for this module.
    pub fn destinations(mut self, destinations: impl IntoIterator<Item = Destination>) -> Self {
        self.destinations = Some(destinations.into_iter().collect());
        self
    }

    /// Build and validate the descriptor, filling defaulted fields.
    pub fn build(self) -> Result<ModuleDescriptor, DomainError> {
        let name = self
            .name
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;

        let descriptor = ModuleDescriptor {
            name,
            product: self.product,
            kinds: self.kinds,
            dependencies: self.dependencies,
            sources: self
                .sources
                .unwrap_or_else(|| naming::default_sources(TargetRole::Main)),
            resources: self.resources.unwrap_or_else(naming::default_resources),
            settings: self.settings,
            plist: self.plist,
            additional_files: self.additional_files,
            configurations: self.configurations,
            destinations: self.destinations,
        };

        descriptor.validate()?;
        Ok(descriptor)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> ModuleDescriptorBuilder<HasName> {
        ModuleDescriptor::builder().name("Login")
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn defaults_to_framework_with_conventional_globs() {
        let d = login().build().unwrap();
        assert_eq!(d.product(), ProductKind::Framework);
        assert!(d.kinds().is_empty());
        assert_eq!(d.sources(), &["Sources/**"]);
        assert_eq!(d.resources(), &["Resources/**"]);
        assert!(d.configurations().is_none());
        assert!(d.destinations().is_none());
        assert!(d.dependencies().is_empty());
    }

    #[test]
    fn kinds_are_a_set() {
        let d = login()
            .kind(ModuleKind::UnitTests)
            .kind(ModuleKind::UnitTests)
            .build()
            .unwrap();
        assert_eq!(d.kinds().len(), 1);
    }

    #[test]
    fn baseline_puts_internal_before_external() {
        let d = login()
            .dependency(DependencyScope::External, TargetDependency::external("Alamofire"))
            .dependency(
                DependencyScope::Internal,
                TargetDependency::project("Core", "../Core"),
            )
            .build()
            .unwrap();
        assert_eq!(
            d.dependencies().baseline(),
            vec![
                TargetDependency::project("Core", "../Core"),
                TargetDependency::external("Alamofire"),
            ]
        );
    }

    // ── Name validation ───────────────────────────────────────────────────────

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            ModuleDescriptor::builder().name("").build(),
            Err(DomainError::InvalidModuleName { .. })
        ));
    }

    #[test]
    fn names_must_be_alphanumeric_identifiers() {
        for bad in ["1Login", "Login-Feature", "Log in", "Login_2", "Löwe"] {
            assert!(validate_module_name(bad).is_err(), "accepted: {bad}");
        }
        for good in ["Login", "A", "Feature2", "HTTPClient"] {
            assert!(validate_module_name(good).is_ok(), "rejected: {good}");
        }
    }

    // ── Cross-field rules ─────────────────────────────────────────────────────

    #[test]
    fn testing_without_interface_is_rejected() {
        let result = login().kind(ModuleKind::Testing).build();
        assert!(matches!(
            result,
            Err(DomainError::TestingRequiresInterface { .. })
        ));
    }

    #[test]
    fn test_bundle_product_is_rejected() {
        let result = login().product(ProductKind::UnitTests).build();
        assert!(matches!(
            result,
            Err(DomainError::InvalidModuleProduct { .. })
        ));
    }

    #[test]
    fn empty_configuration_override_is_rejected() {
        let result = login().configurations(vec![]).build();
        assert!(matches!(
            result,
            Err(DomainError::EmptyConfigurations { .. })
        ));
    }

    #[test]
    fn local_reference_to_sibling_target_is_accepted() {
        let d = login()
            .kinds([ModuleKind::Interface, ModuleKind::Demo])
            .dependency(
                DependencyScope::Demo,
                TargetDependency::target("LoginInterface"),
            )
            .build();
        assert!(d.is_ok());
    }

    #[test]
    fn local_reference_to_missing_target_is_rejected() {
        let result = login()
            .dependency(DependencyScope::Internal, TargetDependency::target("Core"))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::UnresolvedDependency { .. })
        ));
    }

    #[test]
    fn local_reference_to_own_target_is_rejected() {
        let result = login()
            .kind(ModuleKind::Interface)
            .dependency(
                DependencyScope::Interface,
                TargetDependency::target("LoginInterface"),
            )
            .build();
        assert!(matches!(
            result,
            Err(DomainError::UnresolvedDependency { .. })
        ));
    }

    #[test]
    fn main_depending_on_demo_is_a_cycle() {
        let result = login()
            .kind(ModuleKind::Demo)
            .dependency(DependencyScope::Internal, TargetDependency::target("LoginDemo"))
            .build();
        assert_eq!(
            result.unwrap_err(),
            DomainError::DependencyCycle {
                module: "Login".into(),
                cycle: "Login -> LoginDemo -> Login".into(),
            }
        );
    }

    #[test]
    fn cycle_through_implicit_test_edges_is_rejected() {
        // LoginTests -> LoginTesting is implicit; Testing back to Tests closes it.
        let result = login()
            .kinds([ModuleKind::Interface, ModuleKind::Testing, ModuleKind::UnitTests])
            .dependency(DependencyScope::Testing, TargetDependency::target("LoginTests"))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::DependencyCycle { ref cycle, .. })
                if cycle == "LoginTesting -> LoginTests -> LoginTesting"
        ));
    }

    #[test]
    fn cycle_between_two_local_references_is_rejected() {
        let result = login()
            .kinds([ModuleKind::UnitTests, ModuleKind::UiTests])
            .dependency(DependencyScope::UnitTests, TargetDependency::target("LoginUITests"))
            .dependency(DependencyScope::UiTests, TargetDependency::target("LoginTests"))
            .build();
        assert!(matches!(result, Err(DomainError::DependencyCycle { .. })));
    }

    #[test]
    fn test_targets_may_reference_each_other_one_way() {
        let d = login()
            .kinds([ModuleKind::UnitTests, ModuleKind::UiTests, ModuleKind::Demo])
            .dependency(DependencyScope::UiTests, TargetDependency::target("LoginTests"))
            .dependency(DependencyScope::Demo, TargetDependency::target("Login"))
            .build();
        assert!(d.is_ok());
    }

    #[test]
    fn emitted_roles_follow_requested_kinds() {
        let d = login()
            .kinds([ModuleKind::Interface, ModuleKind::Testing, ModuleKind::Demo])
            .build()
            .unwrap();
        assert_eq!(
            d.emitted_roles().into_iter().collect::<Vec<_>>(),
            vec![
                TargetRole::Interface,
                TargetRole::Main,
                TargetRole::Testing,
                TargetRole::Demo
            ]
        );
    }

    #[test]
    fn display_lists_kinds() {
        let d = login()
            .kinds([ModuleKind::Demo, ModuleKind::Interface])
            .build()
            .unwrap();
        assert_eq!(d.to_string(), "Login (framework) + interface, demo");
    }
}
