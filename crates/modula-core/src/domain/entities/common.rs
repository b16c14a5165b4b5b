//! Pass-through values attached to targets: info plists and build scripts.
//!
//! The assembler never interprets these; it only decides which target
//! receives which value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Glob patterns handed to the manifest schema unchanged.
pub type FileGlobs = Vec<String>;

/// A value inside an info plist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlistValue {
    Bool(bool),
    Integer(i64),
    String(String),
    Array(Vec<PlistValue>),
    Dictionary(BTreeMap<String, PlistValue>),
}

impl From<&str> for PlistValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for PlistValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for PlistValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

/// Info plist for a target: the schema's default, or the default extended
/// with extra entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "kebab-case")]
pub enum InfoPlist {
    #[default]
    Default,
    Extending(BTreeMap<String, PlistValue>),
}

impl InfoPlist {
    /// `Default` when there is nothing to extend with.
    pub fn extending(entries: BTreeMap<String, PlistValue>) -> Self {
        if entries.is_empty() {
            Self::Default
        } else {
            Self::Extending(entries)
        }
    }

    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        match self {
            Self::Default => None,
            Self::Extending(entries) => entries.get(key),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

/// When a script runs relative to compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptPhase {
    #[default]
    Pre,
    Post,
}

/// A build-phase script, e.g. a linter invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetScript {
    pub name: String,
    pub script: String,
    #[serde(default)]
    pub phase: ScriptPhase,
}

impl TargetScript {
    pub fn pre(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            phase: ScriptPhase::Pre,
        }
    }

    pub fn post(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: script.into(),
            phase: ScriptPhase::Post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entries_collapse_to_default_plist() {
        assert!(InfoPlist::extending(BTreeMap::new()).is_default());
    }

    #[test]
    fn extending_plist_exposes_entries() {
        let plist = InfoPlist::extending(BTreeMap::from([(
            "NSCameraUsageDescription".to_string(),
            PlistValue::from("Scan badges"),
        )]));
        assert_eq!(
            plist.get("NSCameraUsageDescription"),
            Some(&PlistValue::String("Scan badges".into()))
        );
        assert_eq!(plist.get("Missing"), None);
    }
}
