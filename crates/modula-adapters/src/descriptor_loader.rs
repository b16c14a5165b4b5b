//! Filesystem-based descriptor loader.
//!
//! Discovers and parses `module.toml` descriptors from a directory tree,
//! converting them into domain [`ModuleDescriptor`] objects ready for
//! assembly, and encodes descriptors back into the same format for
//! `modula init`.
//!
//! # Directory layout expected
//!
//! ```text
//! Modules/
//! ├── Login/
//! │   ├── module.toml          ← descriptor (required)
//! │   ├── Sources/
//! │   └── Interface/
//! └── Payments/
//!     ├── module.toml
//!     └── Sources/
//! ```
//!
//! # `module.toml` format
//!
//! ```toml
//! [module]
//! name         = "Login"
//! product      = "framework"                 # optional, default framework
//! kinds        = ["interface", "unit-tests"] # optional
//! destinations = ["iphone", "ipad"]          # optional, default from config
//!
//! [dependencies]
//! internal   = ["project:Core@../Core"]
//! external   = ["external:Alamofire"]
//! unit-tests = ["sdk:XCTest.framework"]
//!
//! [sources]
//! sources          = ["Sources/**"]          # optional
//! resources        = ["Resources/**"]        # optional
//! additional-files = ["README.md"]
//!
//! [settings]
//! SWIFT_VERSION = "5.9"
//!
//! [plist]
//! NSCameraUsageDescription = "Scan badges"
//!
//! # Optional: replaces the default dev/stage/prod set.
//! [[configurations]]
//! name    = "debug"
//! variant = "debug"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use walkdir::{DirEntry, WalkDir};

use modula_core::{
    application::{ApplicationError, ports::DescriptorSource},
    domain::{
        Configuration, DependencyScope, Destination, DomainError, ModuleDescriptor, ModuleKind,
        PlistValue, ProductKind, SettingValue, TargetDependency,
    },
    error::ModulaResult,
};

/// File name of a module descriptor.
pub const DESCRIPTOR_FILE_NAME: &str = "module.toml";

/// Directory names never descended into during discovery.
const SKIPPED_DIRS: &[&str] = &["target", "build", "DerivedData", "node_modules"];

// ── Descriptor file types ─────────────────────────────────────────────────────

/// Deserialised representation of a `module.toml` file.
///
/// All fields map 1-to-1 to TOML sections; see the module-level docs for the
/// full format.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DescriptorFile {
    pub module: ModuleSection,
    #[serde(default)]
    pub dependencies: DependenciesSection,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub settings: BTreeMap<String, SettingValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plist: BTreeMap<String, PlistValue>,
    /// `None` keeps the default set; `Some(vec![])` is rejected on build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<Vec<Configuration>>,
}

/// `[module]` section.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ModuleSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default)]
    pub kinds: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destinations: Option<Vec<String>>,
}

/// `[dependencies]` section. Every entry is a `kind:value` reference.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DependenciesSection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interface: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub testing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unit_tests: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ui_tests: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub demo: Vec<String>,
}

impl DependenciesSection {
    fn scope(&self, scope: DependencyScope) -> &[String] {
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

    fn scope_mut(&mut self, scope: DependencyScope) -> &mut Vec<String> {
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
}

/// `[sources]` section. Absent globs fall back to the conventional layout.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SourcesSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_files: Vec<String>,
}

impl DescriptorFile {
    /// Convert into a validated domain descriptor.
    pub fn into_descriptor(self) -> Result<ModuleDescriptor, DomainError> {
        let mut builder = ModuleDescriptor::builder().name(self.module.name);

        if let Some(product) = &self.module.product {
            builder = builder.product(parse_product(product)?);
        }
        for kind in &self.module.kinds {
            builder = builder.kind(parse_kind(kind)?);
        }
        if let Some(destinations) = &self.module.destinations {
            let parsed = destinations
                .iter()
                .map(|d| parse_destination(d))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.destinations(parsed);
        }

        for scope in DependencyScope::ALL {
            let parsed = self
                .dependencies
                .scope(scope)
                .iter()
                .map(|raw| parse_dependency(raw))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.dependencies(scope, parsed);
        }

        if let Some(sources) = self.sources.sources {
            builder = builder.sources(sources);
        }
        if let Some(resources) = self.sources.resources {
            builder = builder.resources(resources);
        }
        builder = builder
            .additional_files(self.sources.additional_files)
            .settings(self.settings)
            .plist(self.plist);

        if let Some(configurations) = self.configurations {
            builder = builder.configurations(configurations);
        }

        builder.build()
    }
}

impl From<&ModuleDescriptor> for DescriptorFile {
    fn from(descriptor: &ModuleDescriptor) -> Self {
        let mut dependencies = DependenciesSection::default();
        for scope in DependencyScope::ALL {
            *dependencies.scope_mut(scope) = descriptor
                .dependencies()
                .get(scope)
                .iter()
                .map(ToString::to_string)
                .collect();
        }

        Self {
            module: ModuleSection {
                name: descriptor.name().to_string(),
                product: Some(descriptor.product().to_string()),
                kinds: descriptor.kinds().iter().map(ToString::to_string).collect(),
                destinations: descriptor
                    .destinations()
                    .map(|set| set.iter().map(ToString::to_string).collect()),
            },
            dependencies,
            sources: SourcesSection {
                sources: Some(descriptor.sources().clone()),
                resources: Some(descriptor.resources().clone()),
                additional_files: descriptor.additional_files().clone(),
            },
            settings: descriptor.settings().clone(),
            plist: descriptor.plist().clone(),
            configurations: descriptor.configurations().map(<[Configuration]>::to_vec),
        }
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`ModuleDescriptor`] objects from `module.toml` files.
///
/// Unlike a best-effort scan, a single invalid descriptor fails the whole
/// load: generating a partial set of manifests would leave the project
/// inconsistent.
///
/// # Example
///
/// ```no_run
/// use modula_adapters::DescriptorLoader;
/// use modula_core::application::ports::DescriptorSource;
///
/// let loader = DescriptorLoader::new();
/// let modules = loader.load("./Modules".as_ref())?;
/// println!("Loaded {} modules", modules.len());
/// # Ok::<(), modula_core::error::ModulaError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorLoader;

impl DescriptorLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse one descriptor from TOML text. `origin` is only used in errors.
    pub fn parse(&self, raw: &str, origin: &Path) -> ModulaResult<ModuleDescriptor> {
        let file: DescriptorFile =
            toml::from_str(raw).map_err(|e| ApplicationError::DescriptorLoad {
                path: origin.to_path_buf(),
                reason: e.to_string(),
            })?;

        file.into_descriptor().map_err(|e| {
            warn!(path = %origin.display(), error = %e, "invalid module descriptor");
            e.into()
        })
    }

    /// Load a single descriptor file.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load_file(&self, path: &Path) -> ModulaResult<ModuleDescriptor> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::DescriptorLoad {
            path: path.to_path_buf(),
            reason: format!("failed to read: {e}"),
        })?;

        let descriptor = self.parse(&raw, path)?;
        debug!(module = %descriptor.name(), "loaded descriptor");
        Ok(descriptor)
    }

    /// Every descriptor file below `root`, sorted by path.
    ///
    /// Hidden directories and build output directories are skipped.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn discover(&self, root: &Path) -> ModulaResult<Vec<PathBuf>> {
        let mut found = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::DescriptorLoad {
                path: e.path().unwrap_or(root).to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;

            if entry.file_type().is_file() && entry.file_name() == DESCRIPTOR_FILE_NAME {
                found.push(entry.into_path());
            }
        }

        found.sort();
        debug!(count = found.len(), "finished discovering descriptors");
        Ok(found)
    }
}

impl DescriptorSource for DescriptorLoader {
    /// A file is loaded directly; a directory holding a `module.toml` loads
    /// that one module; any other directory is searched recursively.
    fn load(&self, path: &Path) -> ModulaResult<Vec<ModuleDescriptor>> {
        if path.is_file() {
            return Ok(vec![self.load_file(path)?]);
        }
        if !path.is_dir() {
            return Err(ApplicationError::DescriptorNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let own = path.join(DESCRIPTOR_FILE_NAME);
        if own.is_file() {
            return Ok(vec![self.load_file(&own)?]);
        }

        self.discover(path)?
            .iter()
            .map(|file| self.load_file(file))
            .collect()
    }

    fn encode(&self, descriptor: &ModuleDescriptor) -> ModulaResult<String> {
        toml::to_string_pretty(&DescriptorFile::from(descriptor)).map_err(|e| {
            ApplicationError::DescriptorEncode {
                module: descriptor.name().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn file_name(&self) -> &'static str {
        DESCRIPTOR_FILE_NAME
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    entry.file_type().is_dir() && (name.starts_with('.') || SKIPPED_DIRS.iter().any(|d| *d == name))
}

// ── Free parsing functions ────────────────────────────────────────────────────

/// Parse a product kind string (e.g. `"framework"`, `"static-library"`).
pub fn parse_product(s: &str) -> Result<ProductKind, DomainError> {
    s.parse()
}

/// Parse a requested kind (e.g. `"interface"`, `"unit-tests"`).
pub fn parse_kind(s: &str) -> Result<ModuleKind, DomainError> {
    s.parse()
}

/// Parse a destination (e.g. `"iphone"`, `"mac-catalyst"`).
pub fn parse_destination(s: &str) -> Result<Destination, DomainError> {
    s.parse()
}

/// Parse a `kind:value` dependency reference.
pub fn parse_dependency(s: &str) -> Result<TargetDependency, DomainError> {
    s.parse()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
