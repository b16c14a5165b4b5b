//! Manifest Service - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Load descriptors through the `DescriptorSource` port
//! 2. Assemble each module against the environment context
//! 3. Render and optionally write the manifests
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DescriptorSource, Filesystem, ManifestRenderer},
    },
    domain::{
        DomainValidator as validator, EnvironmentContext, Manifest, ModuleDescriptor, assemble,
    },
    error::ModulaResult,
};

/// One assembled and rendered module.
#[derive(Debug, Clone)]
pub struct GeneratedManifest {
    pub module: String,
    pub manifest: Manifest,
    pub rendered: String,
}

/// Outcome of checking one module, for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
    pub module: String,
    pub targets: Vec<String>,
    pub schemes: Vec<String>,
}

impl From<&Manifest> for ManifestSummary {
    fn from(manifest: &Manifest) -> Self {
        Self {
            module: manifest.name().to_string(),
            targets: manifest.target_names().map(str::to_string).collect(),
            schemes: manifest.schemes().iter().map(|s| s.name.clone()).collect(),
        }
    }
}

/// Main manifest service.
pub struct ManifestService {
    source: Box<dyn DescriptorSource>,
    renderer: Box<dyn ManifestRenderer>,
    filesystem: Box<dyn Filesystem>,
    env: EnvironmentContext,
}

impl ManifestService {
    /// Create a new manifest service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use modula_core::application::{ManifestService, ports::*};
    ///
    /// let service = ManifestService::new(
    ///     source,     // impl DescriptorSource
    ///     renderer,   // impl ManifestRenderer
    ///     filesystem, // impl Filesystem
    ///     env,        // EnvironmentContext
    /// );
    /// ```
    pub fn new(
        source: Box<dyn DescriptorSource>,
        renderer: Box<dyn ManifestRenderer>,
        filesystem: Box<dyn Filesystem>,
        env: EnvironmentContext,
    ) -> Self {
        Self {
            source,
            renderer,
            filesystem,
            env,
        }
    }

    pub fn env(&self) -> &EnvironmentContext {
        &self.env
    }

    /// Assemble a single descriptor.
    #[instrument(skip_all, fields(module = %descriptor.name()))]
    pub fn assemble(&self, descriptor: &ModuleDescriptor) -> ModulaResult<Manifest> {
        let manifest = assemble(descriptor, &self.env)?;
        debug!(
            targets = manifest.targets().len(),
            schemes = manifest.schemes().len(),
            "Module assembled"
        );
        Ok(manifest)
    }

    /// Load every descriptor at `path`, assemble and render each.
    ///
    /// Fails on the first invalid module; nothing is returned for the others.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn generate(&self, path: impl AsRef<Path>) -> ModulaResult<Vec<GeneratedManifest>> {
        let descriptors = self.load(path.as_ref())?;

        let mut generated = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            let manifest = self.assemble(descriptor)?;
            let rendered = self.renderer.render(&manifest)?;
            generated.push(GeneratedManifest {
                module: descriptor.name().to_string(),
                manifest,
                rendered,
            });
        }

        info!(modules = generated.len(), "Manifests generated");
        Ok(generated)
    }

    /// Load and assemble without rendering.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn check(&self, path: impl AsRef<Path>) -> ModulaResult<Vec<ManifestSummary>> {
        let descriptors = self.load(path.as_ref())?;

        let summaries = descriptors
            .iter()
            .map(|d| self.assemble(d).map(|m| ManifestSummary::from(&m)))
            .collect::<ModulaResult<Vec<_>>>()?;

        info!(modules = summaries.len(), "All modules valid");
        Ok(summaries)
    }

    /// Path a generated manifest is written to inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path, module: &str) -> PathBuf {
        output_dir.join(format!(
            "{module}.manifest.{}",
            self.renderer.file_extension()
        ))
    }

    /// Write generated manifests into `output_dir`.
    ///
    /// Existing files are refused unless `force` is set. If any write fails,
    /// files created by this call are removed and files it overwrote get
    /// their earlier content back.
    #[instrument(
        skip_all,
        fields(output_dir = %output_dir.as_ref().display(), count = generated.len())
    )]
    pub fn write(
        &self,
        generated: &[GeneratedManifest],
        output_dir: impl AsRef<Path>,
        force: bool,
    ) -> ModulaResult<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        let paths: Vec<PathBuf> = generated
            .iter()
            .map(|g| self.output_path(output_dir, &g.module))
            .collect();

        if !force {
            if let Some(existing) = paths.iter().find(|p| self.filesystem.exists(p)) {
                return Err(ApplicationError::OutputExists {
                    path: existing.clone(),
                }
                .into());
            }
        }

        self.filesystem.create_dir_all(output_dir)?;

        let mut written: Vec<WrittenFile> = Vec::with_capacity(paths.len());
        for (entry, path) in generated.iter().zip(&paths) {
            let previous = if force && self.filesystem.exists(path) {
                match self.filesystem.read_to_string(path) {
                    Ok(content) => Some(content),
                    Err(e) => {
                        self.rollback(&written);
                        return Err(e);
                    }
                }
            } else {
                None
            };

            if let Err(e) = self.filesystem.write_file(path, &entry.rendered) {
                warn!("Write failed, attempting rollback");
                self.rollback(&written);
                return Err(e);
            }
            debug!(path = %path.display(), overwrote = previous.is_some(), "Manifest written");
            written.push(WrittenFile {
                path: path.clone(),
                previous,
            });
        }

        info!("Successfully wrote all manifests");
        Ok(written.into_iter().map(|w| w.path).collect())
    }

    /// Write a starter descriptor to `<root>/<Name>/<file>`.
    #[instrument(skip_all, fields(module = %descriptor.name(), root = %root.as_ref().display()))]
    pub fn init(
        &self,
        descriptor: &ModuleDescriptor,
        root: impl AsRef<Path>,
        force: bool,
    ) -> ModulaResult<PathBuf> {
        validator::validate_descriptor(descriptor)?;

        let dir = root.as_ref().join(descriptor.name());
        let path = dir.join(self.source.file_name());
        if self.filesystem.exists(&path) && !force {
            return Err(ApplicationError::OutputExists { path }.into());
        }

        let content = self.source.encode(descriptor)?;
        self.filesystem.create_dir_all(&dir)?;
        self.filesystem.write_file(&path, &content)?;

        info!(path = %path.display(), "Descriptor written");
        Ok(path)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn load(&self, path: &Path) -> ModulaResult<Vec<ModuleDescriptor>> {
        let descriptors = self.source.load(path)?;
        if descriptors.is_empty() {
            return Err(ApplicationError::NoModulesFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        validator::validate_unique_modules(&descriptors)?;
        debug!(modules = descriptors.len(), "Descriptors loaded");
        Ok(descriptors)
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, written: &[WrittenFile]) {
        for file in written.iter().rev() {
            let result = match &file.previous {
                Some(content) => self.filesystem.write_file(&file.path, content),
                None => self.filesystem.remove_file(&file.path),
            };
            if let Err(e) = result {
                warn!(
                    error = %e,
                    path = %file.path.display(),
                    "Rollback failed"
                );
            }
        }
    }
}

/// A file touched by [`ManifestService::write`], with what it held before.
struct WrittenFile {
    path: PathBuf,
    previous: Option<String>,
}

#[cfg(test)]
mod tests {
    use mockall::predicate::{always, eq};

    use super::*;
    use crate::{
        application::ports::{MockDescriptorSource, MockFilesystem, MockManifestRenderer},
        domain::{DomainError, ModuleKind},
        error::ModulaError,
    };

    fn descriptor(name: &str) -> ModuleDescriptor {
        ModuleDescriptor::builder()
            .name(name)
            .kind(ModuleKind::UnitTests)
            .build()
            .unwrap()
    }

    fn source_with(descriptors: Vec<ModuleDescriptor>) -> MockDescriptorSource {
        let mut source = MockDescriptorSource::new();
        source
            .expect_load()
            .returning(move |_| Ok(descriptors.clone()));
        source.expect_file_name().return_const("module.toml");
        source
    }

    fn renderer() -> MockManifestRenderer {
        let mut renderer = MockManifestRenderer::new();
        renderer
            .expect_render()
            .returning(|m| Ok(format!("manifest {}", m.name())));
        renderer.expect_file_extension().return_const("json");
        renderer
    }

    fn service(source: MockDescriptorSource, filesystem: MockFilesystem) -> ManifestService {
        ManifestService::new(
            Box::new(source),
            Box::new(renderer()),
            Box::new(filesystem),
            EnvironmentContext::default(),
        )
    }

    fn generated(module: &str) -> GeneratedManifest {
        let manifest = assemble(&descriptor(module), &EnvironmentContext::default()).unwrap();
        GeneratedManifest {
            module: module.into(),
            rendered: format!("manifest {module}"),
            manifest,
        }
    }

    // ── generate / check ──────────────────────────────────────────────────────

    #[test]
    fn generate_renders_every_module() {
        let svc = service(
            source_with(vec![descriptor("Login"), descriptor("Payments")]),
            MockFilesystem::new(),
        );

        let out = svc.generate("modules").unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].rendered, "manifest Login");
        assert_eq!(out[1].module, "Payments");
    }

    #[test]
    fn generate_rejects_empty_sources() {
        let svc = service(source_with(vec![]), MockFilesystem::new());
        let err = svc.generate("modules").unwrap_err();
        assert!(matches!(
            err,
            ModulaError::Application(ApplicationError::NoModulesFound { .. })
        ));
    }

    #[test]
    fn generate_rejects_duplicate_modules() {
        let svc = service(
            source_with(vec![descriptor("Login"), descriptor("Login")]),
            MockFilesystem::new(),
        );
        let err = svc.generate("modules").unwrap_err();
        assert!(matches!(
            err,
            ModulaError::Domain(DomainError::DuplicateModule { .. })
        ));
    }

    #[test]
    fn check_summarizes_targets_and_schemes() {
        let svc = service(source_with(vec![descriptor("Login")]), MockFilesystem::new());
        let summaries = svc.check("Login").unwrap();
        assert_eq!(
            summaries,
            vec![ManifestSummary {
                module: "Login".into(),
                targets: vec!["Login".into(), "LoginTests".into()],
                schemes: vec!["Login".into()],
            }]
        );
    }

    // ── write ─────────────────────────────────────────────────────────────────

    #[test]
    fn write_creates_one_file_per_module() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .with(eq(Path::new("out")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("out/Login.manifest.json")), eq("manifest Login"))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(MockDescriptorSource::new(), fs);
        let paths = svc.write(&[generated("Login")], "out", false).unwrap();
        assert_eq!(paths, vec![PathBuf::from("out/Login.manifest.json")]);
    }

    #[test]
    fn write_refuses_existing_output_without_force() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_write_file().never();

        let svc = service(MockDescriptorSource::new(), fs);
        let err = svc.write(&[generated("Login")], "out", false).unwrap_err();
        assert!(matches!(
            err,
            ModulaError::Application(ApplicationError::OutputExists { .. })
        ));
    }

    #[test]
    fn write_overwrites_with_force() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_read_to_string()
            .times(1)
            .returning(|_| Ok("old".into()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));

        let svc = service(MockDescriptorSource::new(), fs);
        assert!(svc.write(&[generated("Login")], "out", true).is_ok());
    }

    #[test]
    fn failed_forced_write_restores_overwritten_files() {
        let login = Path::new("out/Login.manifest.json");
        let payments = Path::new("out/Payments.manifest.json");

        let mut fs = MockFilesystem::new();
        fs.expect_exists().with(eq(login)).returning(|_| true);
        fs.expect_exists().with(eq(payments)).returning(|_| false);
        fs.expect_read_to_string()
            .with(eq(login))
            .times(1)
            .returning(|_| Ok("earlier manifest".into()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .with(eq(login), eq("manifest Login"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(payments), always())
            .returning(|p, _| {
                Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            });
        fs.expect_write_file()
            .with(eq(login), eq("earlier manifest"))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_remove_file().never();

        let svc = service(MockDescriptorSource::new(), fs);
        let result = svc.write(&[generated("Login"), generated("Payments")], "out", true);
        assert!(result.is_err());
    }

    #[test]
    fn failed_write_rolls_back_earlier_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("out/Login.manifest.json")), always())
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("out/Payments.manifest.json")), always())
            .returning(|p, _| {
                Err(ApplicationError::FilesystemError {
                    path: p.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into())
            });
        fs.expect_remove_file()
            .with(eq(Path::new("out/Login.manifest.json")))
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(MockDescriptorSource::new(), fs);
        let result = svc.write(&[generated("Login"), generated("Payments")], "out", false);
        assert!(result.is_err());
    }

    // ── init ──────────────────────────────────────────────────────────────────

    #[test]
    fn init_writes_descriptor_into_module_directory() {
        let mut source = MockDescriptorSource::new();
        source.expect_file_name().return_const("module.toml");
        source
            .expect_encode()
            .returning(|d| Ok(format!("name = \"{}\"", d.name())));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .with(eq(Path::new("modules/Login")))
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("modules/Login/module.toml")), eq("name = \"Login\""))
            .times(1)
            .returning(|_, _| Ok(()));

        let svc = service(source, fs);
        let path = svc.init(&descriptor("Login"), "modules", false).unwrap();
        assert_eq!(path, PathBuf::from("modules/Login/module.toml"));
    }

    #[test]
    fn init_refuses_existing_descriptor() {
        let mut source = MockDescriptorSource::new();
        source.expect_file_name().return_const("module.toml");
        source.expect_encode().never();

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);

        let svc = service(source, fs);
        assert!(svc.init(&descriptor("Login"), "modules", false).is_err());
    }
}
