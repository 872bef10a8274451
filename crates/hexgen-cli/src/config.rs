//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  It is
//! the generation manifest (`hexgen.toml`) plus CLI-only settings; the core
//! crate only ever sees the [`ProjectSettings`] extracted from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the commands, not here)
//! 2. `HEXGEN__*` environment variables, `__` between key segments
//!    (`HEXGEN__DATABASE__PORT=5433`)
//! 3. The manifest: `--config`, else `./hexgen.toml`, else the per-user
//!    config directory
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use hexgen_core::domain::{
    DatabaseSettings, PathSettings, ProjectInfo, ProjectSettings, RelationshipRule,
};

/// Manifest file looked up in the working directory.
pub const MANIFEST_FILE: &str = "hexgen.toml";

const ENV_PREFIX: &str = "HEXGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub project: ProjectInfo,
    pub paths: PathSettings,
    pub database: DatabaseSettings,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory of `<name>.j2` files replacing embedded templates.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from the manifest and the process environment.
    ///
    /// `config_file` is the path given with `--config`; it must exist.
    /// Without it the first existing default location is used, if any.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with_env(config_file.map(PathBuf::as_path), None)
    }

    /// As [`Self::load`], reading variables from `env` instead of the process
    /// environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("failed to build default configuration")?;
        let mut builder = Config::builder().add_source(defaults);

        match config_file {
            Some(path) => {
                debug!(path = %path.display(), "loading manifest");
                builder = builder.add_source(
                    File::from(path).format(FileFormat::Toml).required(true),
                );
            }
            None => {
                if let Some(path) = Self::default_locations().into_iter().find(|p| p.is_file()) {
                    debug!(path = %path.display(), "loading manifest");
                    builder = builder.add_source(File::from(path).format(FileFormat::Toml));
                }
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("failed to read configuration")?;

        config
            .try_deserialize()
            .context("configuration has invalid values")
    }

    /// Candidate manifest paths, in lookup order.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(MANIFEST_FILE)];
        locations.extend(Self::user_config_path());
        locations
    }

    /// Per-user manifest, e.g. `~/.config/hexgen/hexgen.toml` on Linux.
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "hexgen", "hexgen")
            .map(|d| d.config_dir().join(MANIFEST_FILE))
    }

    /// Settings handed to the generation service.
    pub fn settings(&self) -> ProjectSettings {
        ProjectSettings {
            project: self.project.clone(),
            paths: self.paths.clone(),
            database: self.database.clone(),
            relationships: self.relationships.clone(),
        }
    }

    /// Manifest text written by `hexgen init`.
    pub fn to_manifest(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to serialise manifest")
    }
}
