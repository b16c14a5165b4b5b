use std::collections::HashSet;

use serde::Serialize;

use crate::domain::{
    entities::{common::FileGlobs, target::Target},
    error::DomainError,
    value_objects::TargetRole,
};

/// A named build/test/run recipe over targets of the same manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheme {
    pub name: String,
    pub build_target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_target: Option<String>,
    pub code_coverage: bool,
    pub configuration: String,
}

impl Scheme {
    /// Every target name this scheme points at.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.build_target.as_str()).chain(self.test_target.as_deref())
    }
}

/// The complete project description for one module.
///
/// This is the output of assembly. It contains no business logic beyond its
/// own consistency checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub(crate) name: String,
    pub(crate) organization: String,
    pub(crate) targets: Vec<Target>,
    pub(crate) schemes: Vec<Scheme>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) additional_files: FileGlobs,
}

impl Manifest {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Targets in emission order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    pub fn additional_files(&self) -> &FileGlobs {
        &self.additional_files
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    pub fn target_with_role(&self, role: TargetRole) -> Option<&Target> {
        self.targets.iter().find(|t| t.role == role)
    }

    pub fn main_target(&self) -> Option<&Target> {
        self.target_with_role(TargetRole::Main)
    }

    pub fn scheme(&self, name: &str) -> Option<&Scheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.name.as_str())
    }

    /// Check every manifest-wide invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.targets.is_empty() {
            return Err(DomainError::InvalidManifest(format!(
                "manifest '{}' has no targets",
                self.name
            )));
        }

        let mut names = HashSet::new();
        for target in &self.targets {
            target.validate()?;
            if !names.insert(target.name.as_str()) {
                return Err(DomainError::DuplicateTarget {
                    name: target.name.clone(),
                });
            }
        }

        let mains = self
            .targets
            .iter()
            .filter(|t| t.role == TargetRole::Main)
            .count();
        if mains != 1 {
            return Err(DomainError::InvalidManifest(format!(
                "expected exactly one main target, found {mains}"
            )));
        }

        for target in &self.targets {
            if let Some(missing) = target.local_dependencies().find(|d| !names.contains(d)) {
                return Err(DomainError::DanglingReference {
                    target: target.name.clone(),
                    reference: missing.to_string(),
                });
            }
        }

        let mut scheme_names = HashSet::new();
        for scheme in &self.schemes {
            if !scheme_names.insert(scheme.name.as_str()) {
                return Err(DomainError::InvalidManifest(format!(
                    "duplicate scheme '{}'",
                    scheme.name
                )));
            }
            if let Some(missing) = scheme.references().find(|r| !names.contains(r)) {
                return Err(DomainError::DanglingSchemeReference {
                    scheme: scheme.name.clone(),
                    reference: missing.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{dependency::TargetDependency, target::fixtures::target};

    fn manifest(targets: Vec<Target>, schemes: Vec<Scheme>) -> Manifest {
        Manifest {
            name: "Login".into(),
            organization: "io.modula".into(),
            targets,
            schemes,
            additional_files: Vec::new(),
        }
    }

    fn scheme(build: &str, test: Option<&str>) -> Scheme {
        Scheme {
            name: build.into(),
            build_target: build.into(),
            test_target: test.map(Into::into),
            code_coverage: true,
            configuration: "dev".into(),
        }
    }

    #[test]
    fn single_main_target_is_valid() {
        let m = manifest(
            vec![target("Login", TargetRole::Main)],
            vec![scheme("Login", None)],
        );
        assert!(m.validate().is_ok());
        assert_eq!(m.main_target().map(Target::name), Some("Login"));
    }

    #[test]
    fn empty_manifest_is_invalid() {
        assert!(manifest(vec![], vec![]).validate().is_err());
    }

    #[test]
    fn duplicate_target_names_are_rejected() {
        let m = manifest(
            vec![
                target("Login", TargetRole::Main),
                target("Login", TargetRole::Interface),
            ],
            vec![],
        );
        assert!(matches!(
            m.validate(),
            Err(DomainError::DuplicateTarget { .. })
        ));
    }

    #[test]
    fn two_main_targets_are_rejected() {
        let m = manifest(
            vec![
                target("Login", TargetRole::Main),
                target("Other", TargetRole::Main),
            ],
            vec![],
        );
        assert!(matches!(m.validate(), Err(DomainError::InvalidManifest(_))));
    }

    #[test]
    fn dangling_local_reference_is_rejected() {
        let mut main = target("Login", TargetRole::Main);
        main.dependencies.push(TargetDependency::target("LoginInterface"));
        let m = manifest(vec![main], vec![]);
        assert!(matches!(
            m.validate(),
            Err(DomainError::DanglingReference { .. })
        ));
    }

    #[test]
    fn forward_references_resolve() {
        let mut tests = target("LoginTests", TargetRole::UnitTests);
        tests.dependencies.push(TargetDependency::target("LoginDemo"));
        let m = manifest(
            vec![
                target("Login", TargetRole::Main),
                tests,
                target("LoginDemo", TargetRole::Demo),
            ],
            vec![],
        );
        assert!(m.validate().is_ok());
    }

    #[test]
    fn scheme_pointing_at_missing_target_is_rejected() {
        let m = manifest(
            vec![target("Login", TargetRole::Main)],
            vec![scheme("Login", Some("LoginTests"))],
        );
        assert!(matches!(
            m.validate(),
            Err(DomainError::DanglingSchemeReference { .. })
        ));
    }

    #[test]
    fn scheme_without_test_target_omits_the_field() {
        let json = serde_json::to_value(scheme("Login", None)).unwrap();
        assert!(json.get("testTarget").is_none());
        assert_eq!(json["buildTarget"], "Login");
    }
}
