//! Build settings, configurations and the ordered merge that produces a
//! module's effective settings.
//!
//! Merge order is fixed and later layers win:
//!
//! ```text
//! environment base → code-sign defaults → caller overrides → linker policy
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    value_objects::{ConfigurationVariant, ProductKind},
};

/// Key of the linker-flags build setting.
pub const LINKER_FLAGS_KEY: &str = "OTHER_LDFLAGS";

/// Flag appended for framework products so every object file is loaded.
pub const FORCE_LOAD_FLAG: &str = "-all_load";

const INHERITED: &str = "$(inherited)";

/// A single build setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Array(Vec<String>),
}

impl SettingValue {
    /// Whether the value carries `flag` as one of its whitespace-separated
    /// tokens (strings) or elements (arrays).
    pub fn contains_flag(&self, flag: &str) -> bool {
        match self {
            Self::String(s) => s.split_whitespace().any(|t| t == flag),
            Self::Array(items) => items.iter().any(|t| t == flag),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(items: Vec<String>) -> Self {
        Self::Array(items)
    }
}

/// Ordered key → value build settings.
pub type SettingsDictionary = BTreeMap<String, SettingValue>;

/// A named build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub name: String,
    pub variant: ConfigurationVariant,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: SettingsDictionary,
}

impl Configuration {
    pub fn debug(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: ConfigurationVariant::Debug,
            settings: SettingsDictionary::new(),
        }
    }

    pub fn release(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variant: ConfigurationVariant::Release,
            settings: SettingsDictionary::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// The three-tier set used when a module does not override it.
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::debug("dev"),
            Self::debug("stage"),
            Self::release("prod"),
        ]
    }

    /// Reject an empty list or repeated names.
    pub fn validate_set(module: &str, configurations: &[Self]) -> Result<(), DomainError> {
        if configurations.is_empty() {
            return Err(DomainError::EmptyConfigurations {
                module: module.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for configuration in configurations {
            if !seen.insert(configuration.name.as_str()) {
                return Err(DomainError::DuplicateConfiguration {
                    name: configuration.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Effective settings attached to every target of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub base: SettingsDictionary,
    pub configurations: Vec<Configuration>,
}

impl Settings {
    /// Merge `layers` in order (later wins), then apply the linker policy for
    /// `product`.
    pub fn merged<'a>(
        layers: impl IntoIterator<Item = &'a SettingsDictionary>,
        product: ProductKind,
        configurations: Vec<Configuration>,
    ) -> Self {
        let mut base = SettingsDictionary::new();
        for layer in layers {
            base.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        apply_linker_policy(&mut base, product);

        Self {
            base,
            configurations,
        }
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.base.get(key)
    }

    /// Name of the configuration schemes run with.
    pub fn primary_configuration(&self) -> Option<&str> {
        self.configurations.first().map(|c| c.name.as_str())
    }

    pub fn has_force_load(&self) -> bool {
        self.get(LINKER_FLAGS_KEY)
            .is_some_and(|v| v.contains_flag(FORCE_LOAD_FLAG))
    }
}

/// Append `-all_load` to the linker flags of framework products.
///
/// Other products are left untouched, so a caller override that already
/// carries `-all_load` keeps it. A flag already present is not appended twice.
pub fn apply_linker_policy(settings: &mut SettingsDictionary, product: ProductKind) {
    if !product.is_framework() {
        return;
    }

    match settings.get_mut(LINKER_FLAGS_KEY) {
        Some(existing) if existing.contains_flag(FORCE_LOAD_FLAG) => {}
        Some(SettingValue::String(flags)) => {
            if flags.trim().is_empty() {
                *flags = FORCE_LOAD_FLAG.to_string();
            } else {
                flags.push(' ');
                flags.push_str(FORCE_LOAD_FLAG);
            }
        }
        Some(SettingValue::Array(flags)) => flags.push(FORCE_LOAD_FLAG.to_string()),
        None => {
            settings.insert(
                LINKER_FLAGS_KEY.to_string(),
                SettingValue::String(format!("{INHERITED} {FORCE_LOAD_FLAG}")),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(pairs: &[(&str, &str)]) -> SettingsDictionary {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), SettingValue::from(*v)))
            .collect()
    }

    #[test]
    fn later_layers_win() {
        let base = dict(&[("SWIFT_VERSION", "5.9"), ("CODE_SIGN_STYLE", "Manual")]);
        let sign = dict(&[("CODE_SIGN_STYLE", "Automatic")]);
        let overrides = dict(&[("SWIFT_VERSION", "6.0")]);

        let settings = Settings::merged(
            [&base, &sign, &overrides],
            ProductKind::StaticLibrary,
            Configuration::default_set(),
        );

        assert_eq!(settings.get("SWIFT_VERSION"), Some(&"6.0".into()));
        assert_eq!(settings.get("CODE_SIGN_STYLE"), Some(&"Automatic".into()));
    }

    #[test]
    fn framework_gets_force_load_when_flags_absent() {
        let mut settings = SettingsDictionary::new();
        apply_linker_policy(&mut settings, ProductKind::Framework);
        assert_eq!(
            settings.get(LINKER_FLAGS_KEY),
            Some(&"$(inherited) -all_load".into())
        );
    }

    #[test]
    fn framework_appends_to_existing_string_flags() {
        let mut settings = dict(&[(LINKER_FLAGS_KEY, "-ObjC")]);
        apply_linker_policy(&mut settings, ProductKind::Framework);
        assert_eq!(settings.get(LINKER_FLAGS_KEY), Some(&"-ObjC -all_load".into()));
    }

    #[test]
    fn framework_appends_to_existing_array_flags() {
        let mut settings = SettingsDictionary::new();
        settings.insert(
            LINKER_FLAGS_KEY.into(),
            SettingValue::Array(vec!["-ObjC".into()]),
        );
        apply_linker_policy(&mut settings, ProductKind::Framework);
        assert_eq!(
            settings.get(LINKER_FLAGS_KEY),
            Some(&SettingValue::Array(vec!["-ObjC".into(), "-all_load".into()]))
        );
    }

    #[test]
    fn force_load_is_not_duplicated() {
        let mut settings = dict(&[(LINKER_FLAGS_KEY, "-all_load")]);
        apply_linker_policy(&mut settings, ProductKind::Framework);
        assert_eq!(settings.get(LINKER_FLAGS_KEY), Some(&"-all_load".into()));
    }

    #[test]
    fn non_framework_flags_are_untouched() {
        for product in [
            ProductKind::App,
            ProductKind::StaticLibrary,
            ProductKind::StaticFramework,
        ] {
            let mut settings = dict(&[(LINKER_FLAGS_KEY, "-ObjC")]);
            apply_linker_policy(&mut settings, product);
            assert_eq!(settings.get(LINKER_FLAGS_KEY), Some(&"-ObjC".into()));

            let mut empty = SettingsDictionary::new();
            apply_linker_policy(&mut empty, product);
            assert!(empty.is_empty());
        }
    }

    #[test]
    fn caller_force_load_survives_on_other_products() {
        let mut settings = dict(&[(LINKER_FLAGS_KEY, "-ObjC -all_load")]);
        apply_linker_policy(&mut settings, ProductKind::StaticLibrary);
        assert_eq!(
            settings.get(LINKER_FLAGS_KEY),
            Some(&"-ObjC -all_load".into())
        );
    }

    #[test]
    fn default_configurations_are_dev_stage_prod() {
        let set = Configuration::default_set();
        let names: Vec<_> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["dev", "stage", "prod"]);
        assert_eq!(set[2].variant, ConfigurationVariant::Release);
    }

    #[test]
    fn configuration_set_rejects_empty_and_duplicates() {
        assert!(matches!(
            Configuration::validate_set("Login", &[]),
            Err(DomainError::EmptyConfigurations { .. })
        ));
        assert!(matches!(
            Configuration::validate_set(
                "Login",
                &[Configuration::debug("dev"), Configuration::release("dev")]
            ),
            Err(DomainError::DuplicateConfiguration { .. })
        ));
    }
}
