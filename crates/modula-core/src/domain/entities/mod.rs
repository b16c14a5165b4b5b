pub mod common;
pub mod dependency;
pub mod descriptor;
pub mod manifest;
pub mod settings;
pub mod target;

pub use crate::domain::DomainError;
pub use common::{FileGlobs, InfoPlist, PlistValue, ScriptPhase, TargetScript};
pub use dependency::TargetDependency;
pub use descriptor::{DependencyScope, ModuleDependencies, ModuleDescriptor};
pub use manifest::{Manifest, Scheme};
pub use settings::{Configuration, SettingValue, Settings, SettingsDictionary};
pub use target::Target;
