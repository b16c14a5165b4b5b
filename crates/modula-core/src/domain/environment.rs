//! The process-wide environment context.
//!
//! An [`EnvironmentContext`] is built once at startup and passed by reference
//! into every assembly. It never changes afterwards; in particular the CI flag
//! is derived once from the raw signal handed to the builder and is never
//! re-read.
//!
//! Reading the signal from the process environment is the caller's job: the
//! domain does no I/O.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{SettingValue, SettingsDictionary, TargetScript},
    value_objects::Destination,
};

/// Environment variable carrying the CI signal.
pub const CI_SIGNAL_VAR: &str = "IS_CI";

pub const DEFAULT_ORGANIZATION: &str = "io.modula";
pub const DEFAULT_IOS_DEPLOYMENT_TARGET: &str = "16.0";

/// `"1"` means CI; anything else, including no value, does not.
pub fn ci_signal_enabled(raw: Option<&str>) -> bool {
    raw == Some("1")
}

/// Minimum OS versions, passed to the schema unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeploymentTargets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ios: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visionos: Option<String>,
}

impl DeploymentTargets {
    pub fn ios(version: impl Into<String>) -> Self {
        Self {
            ios: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Immutable defaults shared by every module assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentContext {
    organization: String,
    deployment_targets: DeploymentTargets,
    destinations: BTreeSet<Destination>,
    base_settings: SettingsDictionary,
    code_sign_settings: SettingsDictionary,
    lint_script: Option<TargetScript>,
    is_ci: bool,
}

impl EnvironmentContext {
    pub fn builder() -> EnvironmentContextBuilder {
        EnvironmentContextBuilder::default()
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn deployment_targets(&self) -> &DeploymentTargets {
        &self.deployment_targets
    }

    pub fn destinations(&self) -> &BTreeSet<Destination> {
        &self.destinations
    }

    pub fn base_settings(&self) -> &SettingsDictionary {
        &self.base_settings
    }

    pub fn code_sign_settings(&self) -> &SettingsDictionary {
        &self.code_sign_settings
    }

    pub fn lint_script(&self) -> Option<&TargetScript> {
        self.lint_script.as_ref()
    }

    pub const fn is_ci(&self) -> bool {
        self.is_ci
    }
}

impl Default for EnvironmentContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`EnvironmentContext`]. Every field has a default.
#[derive(Debug, Clone)]
pub struct EnvironmentContextBuilder {
    organization: String,
    deployment_targets: DeploymentTargets,
    destinations: BTreeSet<Destination>,
    base_settings: SettingsDictionary,
    code_sign_settings: SettingsDictionary,
    lint_script: Option<TargetScript>,
    is_ci: bool,
}

impl Default for EnvironmentContextBuilder {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            deployment_targets: DeploymentTargets::ios(DEFAULT_IOS_DEPLOYMENT_TARGET),
            destinations: BTreeSet::from([Destination::Iphone, Destination::Ipad]),
            base_settings: default_base_settings(),
            code_sign_settings: default_code_sign_settings(),
            lint_script: Some(default_lint_script()),
            is_ci: false,
        }
    }
}

impl EnvironmentContextBuilder {
    pub fn organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = organization.into();
        self
    }

    pub fn deployment_targets(mut self, targets: DeploymentTargets) -> Self {
        self.deployment_targets = targets;
        self
    }

    pub fn destinations(mut self, destinations: impl IntoIterator<Item = Destination>) -> Self {
        self.destinations = destinations.into_iter().collect();
        self
    }

    /// Replace the base settings wholesale.
    pub fn base_settings(mut self, settings: SettingsDictionary) -> Self {
        self.base_settings = settings;
        self
    }

    pub fn base_setting(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.base_settings.insert(key.into(), value.into());
        self
    }

    /// Replace the code-sign defaults wholesale.
    pub fn code_sign_settings(mut self, settings: SettingsDictionary) -> Self {
        self.code_sign_settings = settings;
        self
    }

    pub fn lint_script(mut self, script: Option<TargetScript>) -> Self {
        self.lint_script = script;
        self
    }

    pub fn is_ci(mut self, is_ci: bool) -> Self {
        self.is_ci = is_ci;
        self
    }

    /// Derive the CI flag from the raw value of [`CI_SIGNAL_VAR`].
    pub fn ci_signal(self, raw: Option<&str>) -> Self {
        self.is_ci(ci_signal_enabled(raw))
    }

    pub fn build(self) -> EnvironmentContext {
        EnvironmentContext {
            organization: self.organization,
            deployment_targets: self.deployment_targets,
            destinations: self.destinations,
            base_settings: self.base_settings,
            code_sign_settings: self.code_sign_settings,
            lint_script: self.lint_script,
            is_ci: self.is_ci,
        }
    }
}

pub fn default_base_settings() -> SettingsDictionary {
    SettingsDictionary::from([
        ("SWIFT_VERSION".to_string(), SettingValue::from("5.9")),
        ("CLANG_ENABLE_MODULES".to_string(), SettingValue::from("YES")),
        ("ENABLE_BITCODE".to_string(), SettingValue::from("NO")),
    ])
}

pub fn default_code_sign_settings() -> SettingsDictionary {
    SettingsDictionary::from([
        ("CODE_SIGN_STYLE".to_string(), SettingValue::from("Automatic")),
        (
            "CODE_SIGN_IDENTITY".to_string(),
            SettingValue::from("Apple Development"),
        ),
    ])
}

pub fn default_lint_script() -> TargetScript {
    TargetScript::pre(
        "Lint",
        "if which swiftlint > /dev/null; then swiftlint lint --quiet; fi",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ci_signal_is_true_only_for_one() {
        assert!(ci_signal_enabled(Some("1")));
        assert!(!ci_signal_enabled(Some("true")));
        assert!(!ci_signal_enabled(Some("0")));
        assert!(!ci_signal_enabled(Some("")));
        assert!(!ci_signal_enabled(None));
    }

    #[test]
    fn builder_derives_ci_from_signal() {
        let ci = EnvironmentContext::builder().ci_signal(Some("1")).build();
        let local = EnvironmentContext::builder().ci_signal(None).build();
        assert!(ci.is_ci());
        assert!(!local.is_ci());
    }

    #[test]
    fn defaults_are_populated() {
        let env = EnvironmentContext::default();
        assert_eq!(env.organization(), DEFAULT_ORGANIZATION);
        assert_eq!(
            env.deployment_targets().ios.as_deref(),
            Some(DEFAULT_IOS_DEPLOYMENT_TARGET)
        );
        assert!(env.destinations().contains(&Destination::Iphone));
        assert!(env.base_settings().contains_key("SWIFT_VERSION"));
        assert!(env.code_sign_settings().contains_key("CODE_SIGN_STYLE"));
        assert!(env.lint_script().is_some());
    }

    #[test]
    fn builder_overrides_defaults() {
        let env = EnvironmentContext::builder()
            .organization("com.example")
            .destinations([Destination::Mac])
            .lint_script(None)
            .base_setting("SWIFT_VERSION", "6.0")
            .build();

        assert_eq!(env.organization(), "com.example");
        assert_eq!(env.destinations().len(), 1);
        assert!(env.lint_script().is_none());
        assert_eq!(
            env.base_settings().get("SWIFT_VERSION"),
            Some(&SettingValue::from("6.0"))
        );
    }
}
