//! Domain value objects: ProductKind, ModuleKind, TargetRole, Destination,
//! ConfigurationVariant.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers. Naming and layout
//! conventions live in `naming.rs`; the branching logic lives in
//! `assembler.rs`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProductKind ──────────────────────────────────────────────────────────────

/// The product a target builds into.
///
/// The schema that consumes the manifest gives each variant its meaning; the
/// assembler only cares whether a product is a `Framework` (linker policy).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    App,
    #[default]
    Framework,
    StaticFramework,
    StaticLibrary,
    DynamicLibrary,
    Bundle,
    UnitTests,
    UiTests,
}

impl ProductKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Framework => "framework",
            Self::StaticFramework => "static-framework",
            Self::StaticLibrary => "static-library",
            Self::DynamicLibrary => "dynamic-library",
            Self::Bundle => "bundle",
            Self::UnitTests => "unit-tests",
            Self::UiTests => "ui-tests",
        }
    }

    /// Only a dynamic `Framework` gets the force-load linker flag.
    pub const fn is_framework(self) -> bool {
        matches!(self, Self::Framework)
    }

    /// Products a caller may pick for the main target of a module.
    ///
    /// Test bundles are produced by the assembler itself.
    pub const fn is_module_product(self) -> bool {
        !matches!(self, Self::UnitTests | Self::UiTests)
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "app" | "application" => Ok(Self::App),
            "framework" | "dynamicframework" => Ok(Self::Framework),
            "staticframework" => Ok(Self::StaticFramework),
            "staticlibrary" | "staticlib" => Ok(Self::StaticLibrary),
            "dynamiclibrary" | "dylib" => Ok(Self::DynamicLibrary),
            "bundle" => Ok(Self::Bundle),
            "unittests" => Ok(Self::UnitTests),
            "uitests" => Ok(Self::UiTests),
            _ => Err(DomainError::InvalidValue {
                field: "product",
                value: s.to_string(),
            }),
        }
    }
}

// ── ModuleKind ───────────────────────────────────────────────────────────────

/// A sub-target a caller may request for a module.
///
/// The main target is not listed: it is always produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    Interface,
    Testing,
    UnitTests,
    UiTests,
    Demo,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 5] = [
        Self::Interface,
        Self::Testing,
        Self::UnitTests,
        Self::UiTests,
        Self::Demo,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Testing => "testing",
            Self::UnitTests => "unit-tests",
            Self::UiTests => "ui-tests",
            Self::Demo => "demo",
        }
    }

    /// The target role produced when this kind is requested.
    pub const fn role(self) -> TargetRole {
        match self {
            Self::Interface => TargetRole::Interface,
            Self::Testing => TargetRole::Testing,
            Self::UnitTests => TargetRole::UnitTests,
            Self::UiTests => TargetRole::UiTests,
            Self::Demo => TargetRole::Demo,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "interface" => Ok(Self::Interface),
            "testing" | "mocks" => Ok(Self::Testing),
            "unittests" | "unittest" | "tests" => Ok(Self::UnitTests),
            "uitests" | "uitest" => Ok(Self::UiTests),
            "demo" | "example" => Ok(Self::Demo),
            _ => Err(DomainError::InvalidValue {
                field: "kind",
                value: s.to_string(),
            }),
        }
    }
}

// ── TargetRole ───────────────────────────────────────────────────────────────

/// The role a target plays inside a module's manifest.
///
/// Declaration order is the fixed insertion order of targets in a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetRole {
    Interface,
    Main,
    Testing,
    UnitTests,
    UiTests,
    Demo,
}

impl TargetRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::Main => "main",
            Self::Testing => "testing",
            Self::UnitTests => "unit-tests",
            Self::UiTests => "ui-tests",
            Self::Demo => "demo",
        }
    }

    pub const fn is_test(self) -> bool {
        matches!(self, Self::UnitTests | Self::UiTests)
    }
}

impl fmt::Display for TargetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Destination ──────────────────────────────────────────────────────────────

/// A device family a target runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Destination {
    Iphone,
    Ipad,
    Mac,
    MacCatalyst,
    Vision,
}

impl Destination {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Iphone => "iphone",
            Self::Ipad => "ipad",
            Self::Mac => "mac",
            Self::MacCatalyst => "mac-catalyst",
            Self::Vision => "vision",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Destination {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "iphone" => Ok(Self::Iphone),
            "ipad" => Ok(Self::Ipad),
            "mac" | "macos" => Ok(Self::Mac),
            "maccatalyst" | "catalyst" => Ok(Self::MacCatalyst),
            "vision" | "visionos" => Ok(Self::Vision),
            _ => Err(DomainError::InvalidValue {
                field: "destination",
                value: s.to_string(),
            }),
        }
    }
}

// ── ConfigurationVariant ─────────────────────────────────────────────────────

/// Whether a build configuration is a debug or a release flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationVariant {
    Debug,
    Release,
}

impl ConfigurationVariant {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for ConfigurationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigurationVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(DomainError::InvalidValue {
                field: "variant",
                value: s.to_string(),
            }),
        }
    }
}

/// Lowercase and drop separators so `unit-tests`, `unit_tests` and
/// `unitTests` all parse the same way.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_kind_accepts_camel_and_kebab_case() {
        assert_eq!(
            ProductKind::from_str("staticLibrary").unwrap(),
            ProductKind::StaticLibrary
        );
        assert_eq!(
            ProductKind::from_str("static-library").unwrap(),
            ProductKind::StaticLibrary
        );
        assert!(ProductKind::from_str("executable").is_err());
    }

    #[test]
    fn only_dynamic_framework_is_framework() {
        assert!(ProductKind::Framework.is_framework());
        assert!(!ProductKind::StaticFramework.is_framework());
        assert!(!ProductKind::StaticLibrary.is_framework());
        assert!(!ProductKind::App.is_framework());
    }

    #[test]
    fn test_bundles_are_not_module_products() {
        assert!(!ProductKind::UnitTests.is_module_product());
        assert!(!ProductKind::UiTests.is_module_product());
        assert!(ProductKind::App.is_module_product());
    }

    #[test]
    fn module_kind_parses_aliases() {
        assert_eq!(ModuleKind::from_str("unitTest").unwrap(), ModuleKind::UnitTests);
        assert_eq!(ModuleKind::from_str("ui_tests").unwrap(), ModuleKind::UiTests);
        assert_eq!(ModuleKind::from_str("Demo").unwrap(), ModuleKind::Demo);
        assert!(ModuleKind::from_str("snapshot").is_err());
    }

    #[test]
    fn module_kind_round_trips_through_display() {
        for kind in ModuleKind::ALL {
            assert_eq!(ModuleKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn target_roles_order_matches_manifest_order() {
        let mut roles = vec![
            TargetRole::Demo,
            TargetRole::Main,
            TargetRole::UiTests,
            TargetRole::Interface,
            TargetRole::UnitTests,
            TargetRole::Testing,
        ];
        roles.sort();
        assert_eq!(
            roles,
            vec![
                TargetRole::Interface,
                TargetRole::Main,
                TargetRole::Testing,
                TargetRole::UnitTests,
                TargetRole::UiTests,
                TargetRole::Demo,
            ]
        );
    }

    #[test]
    fn destination_parses_platform_names() {
        assert_eq!(Destination::from_str("macOS").unwrap(), Destination::Mac);
        assert_eq!(Destination::from_str("iPhone").unwrap(), Destination::Iphone);
        assert!(Destination::from_str("watch").is_err());
    }
}
