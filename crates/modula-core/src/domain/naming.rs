//! Naming and layout conventions.
//!
//! Every derived name in a manifest comes from here: target names, bundle
//! identifiers, scheme names and the default source globs of each role. The
//! assembler creates targets and references them through the same
//! [`ModuleNames`] value, so a reference can never drift from the name the
//! target was created with.

use crate::domain::value_objects::TargetRole;

/// Name suffix appended to the module name for each role.
pub const fn role_suffix(role: TargetRole) -> &'static str {
    match role {
        TargetRole::Interface => "Interface",
        TargetRole::Main => "",
        TargetRole::Testing => "Testing",
        TargetRole::UnitTests => "Tests",
        TargetRole::UiTests => "UITests",
        TargetRole::Demo => "Demo",
    }
}

/// Default source globs for a role; the main target takes its sources from
/// the descriptor instead.
pub fn default_sources(role: TargetRole) -> Vec<String> {
    let globs: &[&str] = match role {
        TargetRole::Interface => &["Interface/**"],
        TargetRole::Main => &["Sources/**"],
        TargetRole::Testing => &["Testing/**"],
        TargetRole::UnitTests => &["Tests/**"],
        TargetRole::UiTests => &[],
        TargetRole::Demo => &["Demo/Sources/**"],
    };
    globs.iter().map(|g| g.to_string()).collect()
}

/// Default resources of the main target.
pub fn default_resources() -> Vec<String> {
    vec!["Resources/**".to_string()]
}

/// Resource path of the demo harness.
pub fn demo_resources() -> Vec<String> {
    vec!["Demo/Resources/**".to_string()]
}

/// Bundle identifier `<organization>.<target>`.
pub fn bundle_id(organization: &str, target_name: &str) -> String {
    format!("{organization}.{target_name}")
}

/// Derived names for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNames {
    module: String,
}

impl ModuleNames {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Target name for `role`. The main target is the bare module name.
    pub fn target(&self, role: TargetRole) -> String {
        format!("{}{}", self.module, role_suffix(role))
    }

    /// Scheme that builds the main target.
    pub fn primary_scheme(&self) -> String {
        self.target(TargetRole::Main)
    }

    /// Scheme that builds the demo harness.
    pub fn demo_scheme(&self) -> String {
        self.target(TargetRole::Demo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_derives_a_distinct_name() {
        let names = ModuleNames::new("Login");
        let derived: Vec<String> = [
            TargetRole::Interface,
            TargetRole::Main,
            TargetRole::Testing,
            TargetRole::UnitTests,
            TargetRole::UiTests,
            TargetRole::Demo,
        ]
        .into_iter()
        .map(|r| names.target(r))
        .collect();

        assert_eq!(
            derived,
            [
                "LoginInterface",
                "Login",
                "LoginTesting",
                "LoginTests",
                "LoginUITests",
                "LoginDemo"
            ]
        );
    }

    #[test]
    fn main_target_does_not_collide_with_interface() {
        let names = ModuleNames::new("Login");
        assert_ne!(
            names.target(TargetRole::Main),
            names.target(TargetRole::Interface)
        );
    }

    #[test]
    fn bundle_id_prefixes_organization() {
        assert_eq!(bundle_id("io.modula", "LoginTesting"), "io.modula.LoginTesting");
    }

    #[test]
    fn ui_tests_have_no_own_sources() {
        assert!(default_sources(TargetRole::UiTests).is_empty());
        assert_eq!(default_sources(TargetRole::Interface), ["Interface/**"]);
    }
}
