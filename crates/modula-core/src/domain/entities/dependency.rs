//! Dependency references between targets.
//!
//! A reference is opaque to the assembler unless it is a `Target` reference,
//! which must resolve inside the manifest being assembled.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A dependency edge from a target to something it links against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TargetDependency {
    /// A target in the same manifest.
    Target { name: String },
    /// A target of another project, addressed by relative path.
    Project { target: String, path: String },
    /// A package product resolved outside this tool.
    External { name: String },
    /// A system library or framework.
    Sdk { name: String },
}

impl TargetDependency {
    pub fn target(name: impl Into<String>) -> Self {
        Self::Target { name: name.into() }
    }

    pub fn project(target: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Project {
            target: target.into(),
            path: path.into(),
        }
    }

    pub fn external(name: impl Into<String>) -> Self {
        Self::External { name: name.into() }
    }

    pub fn sdk(name: impl Into<String>) -> Self {
        Self::Sdk { name: name.into() }
    }

    /// Name of the in-manifest target this references, if any.
    pub fn local_target(&self) -> Option<&str> {
        match self {
            Self::Target { name } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TargetDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target { name } => write!(f, "target:{name}"),
            Self::Project { target, path } => write!(f, "project:{target}@{path}"),
            Self::External { name } => write!(f, "external:{name}"),
            Self::Sdk { name } => write!(f, "sdk:{name}"),
        }
    }
}

/// Parses `kind:value`, e.g. `external:Alamofire` or `project:Core@../Core`.
impl FromStr for TargetDependency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidDependency {
            reference: s.to_string(),
            reason: reason.to_string(),
        };

        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected '<kind>:<value>'"))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid("value is empty"));
        }

        match kind.trim().to_ascii_lowercase().as_str() {
            "target" => Ok(Self::target(value)),
            "external" | "package" => Ok(Self::external(value)),
            "sdk" => Ok(Self::sdk(value)),
            "project" => {
                let (target, path) = value
                    .split_once('@')
                    .ok_or_else(|| invalid("project references need '<Target>@<path>'"))?;
                if target.is_empty() || path.is_empty() {
                    return Err(invalid("project target and path must both be set"));
                }
                Ok(Self::project(target, path))
            }
            other => Err(invalid(&format!("unknown dependency kind '{other}'"))),
        }
    }
}
