//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only ever sees the
//! [`EnvironmentContext`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `MODULA_*` environment variables, `__` separating sections
//!    (`MODULA_ENVIRONMENT__ORGANIZATION=com.example`)
//! 3. Config file (`--config`, or [`AppConfig::config_path`] if present)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use modula_core::domain::{
    CI_SIGNAL_VAR, DeploymentTargets, Destination, EnvironmentContext, SettingsDictionary,
    TargetScript,
    environment::{
        DEFAULT_IOS_DEPLOYMENT_TARGET, DEFAULT_ORGANIZATION, default_base_settings,
        default_code_sign_settings, default_lint_script,
    },
};

use crate::cli::ManifestFormat;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "MODULA";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults shared by every assembled module.
    pub environment: EnvironmentConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// `[environment]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub organization: String,
    pub destinations: Vec<Destination>,
    pub lint_enabled: bool,
    pub deployment_targets: DeploymentTargets,
    pub base_settings: SettingsDictionary,
    pub code_sign_settings: SettingsDictionary,
    pub lint_script: TargetScript,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            organization: DEFAULT_ORGANIZATION.to_string(),
            destinations: vec![Destination::Iphone, Destination::Ipad],
            lint_enabled: true,
            deployment_targets: DeploymentTargets::ios(DEFAULT_IOS_DEPLOYMENT_TARGET),
            base_settings: default_base_settings(),
            code_sign_settings: default_code_sign_settings(),
            lint_script: default_lint_script(),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Manifest format used when `generate --format` is not given.
    pub format: ManifestFormat,
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the platform default is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };
        let defaults =
            Config::try_from(&Self::default()).context("Failed to build default configuration")?;

        Config::builder()
            .add_source(defaults)
            .add_source(file.format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.modula.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "modula", "modula")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".modula.toml"))
    }

    /// Build the context, reading the CI signal from the process environment.
    pub fn environment_context(&self) -> EnvironmentContext {
        let signal = std::env::var(CI_SIGNAL_VAR).ok();
        self.environment_context_with(signal.as_deref())
    }

    /// Build the context from an explicit CI signal value.
    pub fn environment_context_with(&self, ci_signal: Option<&str>) -> EnvironmentContext {
        let env = &self.environment;
        EnvironmentContext::builder()
            .organization(env.organization.clone())
            .deployment_targets(env.deployment_targets.clone())
            .destinations(env.destinations.iter().copied())
            .base_settings(env.base_settings.clone())
            .code_sign_settings(env.code_sign_settings.clone())
            .lint_script(env.lint_enabled.then(|| env.lint_script.clone()))
            .ci_signal(ci_signal)
            .build()
    }
}
